use crate::models::User;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of activity a feed entry records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeedEventKind {
    Reaction,
    Comment,
}

impl FeedEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            FeedEventKind::Reaction => "reaction",
            FeedEventKind::Comment => "comment",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "comment" => FeedEventKind::Comment,
            _ => FeedEventKind::Reaction,
        }
    }
}

/// Append-only activity log entry.
///
/// Feed events are never mutated and never pruned, even when the reaction or
/// comment they originated from is later deleted. The feed is a record of
/// actions, not a view of current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FeedEventKind,
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    pub created_at: i64,
}

impl FeedEvent {
    /// Entry for a reaction create or change
    pub fn for_reaction(image_id: &str, emoji: &str, user: &User, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: FeedEventKind::Reaction,
            image_id: image_id.to_string(),
            image_url: None,
            emoji: Some(emoji.to_string()),
            text: None,
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.clone(),
            created_at,
        }
    }

    /// Entry for a posted comment
    pub fn for_comment(image_id: &str, text: &str, user: &User, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: FeedEventKind::Comment,
            image_id: image_id.to_string(),
            image_url: None,
            emoji: None,
            text: Some(text.to_string()),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.clone(),
            created_at,
        }
    }

    pub fn to_attrs(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        attrs.insert("imageId".to_string(), Value::String(self.image_id.clone()));
        if let Some(url) = &self.image_url {
            attrs.insert("imageUrl".to_string(), Value::String(url.clone()));
        }
        if let Some(emoji) = &self.emoji {
            attrs.insert("emoji".to_string(), Value::String(emoji.clone()));
        }
        if let Some(text) = &self.text {
            attrs.insert("text".to_string(), Value::String(text.clone()));
        }
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
    fn test_kind_travels_as_type() {
        let user = User::generate();
        let event = FeedEvent::for_reaction("img-1", "🎉", &user, 42);
        let wire = serde_json::to_value(&event).unwrap();
        assert_eq!(wire["type"], "reaction");
        assert_eq!(wire["emoji"], "🎉");
        assert!(wire.get("text").is_none());
    }

    #[test]
    fn test_comment_event_carries_text() {
        let user = User::generate();
        let event = FeedEvent::for_comment("img-1", "nice shot", &user, 42);
        assert_eq!(event.kind, FeedEventKind::Comment);
        let attrs = event.to_attrs();
        assert_eq!(attrs["text"], "nice shot");
        assert!(!attrs.contains_key("emoji"));
        assert!(!attrs.contains_key("id"));
    }

    #[test]
    fn test_kind_from_str_defaults_to_reaction() {
        assert_eq!(FeedEventKind::from_str("comment"), FeedEventKind::Comment);
        assert_eq!(FeedEventKind::from_str("reaction"), FeedEventKind::Reaction);
        assert_eq!(FeedEventKind::from_str("unknown"), FeedEventKind::Reaction);
    }
}
