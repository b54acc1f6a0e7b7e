use crate::models::User;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One emoji attached by one user to one photo.
///
/// At most one reaction is live per (image, user) pair; the interaction
/// service's toggle protocol enforces this, not the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: String,
    pub image_id: String,
    pub emoji: String,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    pub created_at: i64,
}

impl Reaction {
    pub fn new(image_id: &str, emoji: &str, user: &User, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_id: image_id.to_string(),
            emoji: emoji.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.clone(),
            created_at,
        }
    }

    /// Wire attributes for a create operation. The id travels as the record
    /// key, never inside the attributes.
    pub fn to_attrs(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("imageId".to_string(), Value::String(self.image_id.clone()));
        attrs.insert("emoji".to_string(), Value::String(self.emoji.clone()));
        attrs.insert("userId".to_string(), Value::String(self.user_id.clone()));
        attrs.insert("userName".to_string(), Value::String(self.user_name.clone()));
        attrs.insert("userColor".to_string(), Value::String(self.user_color.clone()));
        attrs.insert("createdAt".to_string(), Value::Number(self.created_at.into()));
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip_uses_camel_case() {
        let user = User::generate();
        let reaction = Reaction::new("img-1", "❤️", &user, 1_700_000_000_000);
        let wire = serde_json::to_value(&reaction).unwrap();
        assert_eq!(wire["imageId"], "img-1");
        assert_eq!(wire["userId"], user.id.as_str());

        let parsed: Reaction = serde_json::from_value(wire).unwrap();
        assert_eq!(parsed, reaction);
    }

    #[test]
    fn test_attrs_never_carry_the_id() {
        let user = User::generate();
        let reaction = Reaction::new("img-1", "🔥", &user, 1);
        let attrs = reaction.to_attrs();
        assert!(!attrs.contains_key("id"));
        assert_eq!(attrs["emoji"], "🔥");
        assert_eq!(attrs["createdAt"], 1);
    }
}
