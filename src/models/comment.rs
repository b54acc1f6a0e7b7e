use crate::error::AppError;
use crate::models::User;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum comment length, counted in characters
pub const MAX_COMMENT_LEN: usize = 500;

/// One comment by one user on one photo. Deletable only by its author
/// (a UI affordance, not a backend rule).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub image_id: String,
    pub text: String,
    pub user_id: String,
    pub user_name: String,
    pub user_color: String,
    pub created_at: i64,
}

impl Comment {
    pub fn new(image_id: &str, text: &str, user: &User, created_at: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_id: image_id.to_string(),
            text: text.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_color: user.color.clone(),
            created_at,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::Validation(
                "Comment text must not be empty".to_string(),
            ));
        }

        if self.text.chars().count() > MAX_COMMENT_LEN {
            return Err(AppError::Validation(format!(
                "Comment must not exceed {} characters",
                MAX_COMMENT_LEN
            )));
        }

        Ok(())
    }

    pub fn to_attrs(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert("imageId".to_string(), Value::String(self.image_id.clone()));
        attrs.insert("text".to_string(), Value::String(self.text.clone()));
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
    fn test_validate_length_boundary() {
        let user = User::generate();
        let at_limit = "x".repeat(MAX_COMMENT_LEN);
        Comment::new("img", &at_limit, &user, 1).validate().unwrap();

        let over_limit = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(Comment::new("img", &over_limit, &user, 1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace_only() {
        let user = User::generate();
        assert!(Comment::new("img", "  \n ", &user, 1).validate().is_err());
    }

    #[test]
    fn test_length_is_counted_in_characters() {
        // 500 multi-byte characters are within the limit even though the
        // byte length is far larger.
        let user = User::generate();
        let emoji_text = "😀".repeat(MAX_COMMENT_LEN);
        Comment::new("img", &emoji_text, &user, 1).validate().unwrap();
    }
}
