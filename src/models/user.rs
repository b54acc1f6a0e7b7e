use crate::error::AppError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The local browser/app identity.
///
/// A display convenience, not an authentication credential: ids are generated
/// independently per install and never coordinated across devices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub color: String,
    pub avatar: String,
}

impl User {
    /// Synthesize a fresh identity with a random display name and accent color
    pub fn generate() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        let mut rng = rand::rng();
        let name = format!("User{}", rng.random_range(0..10_000));
        let color = random_accent_color();
        let avatar = format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", id);

        Self {
            id,
            name,
            color,
            avatar,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.id.trim().is_empty() {
            return Err(AppError::Validation("User id must not be empty".to_string()));
        }

        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Name must not be empty".to_string()));
        }

        if self.name.len() > 50 {
            return Err(AppError::Validation(
                "Name must not exceed 50 characters".to_string(),
            ));
        }

        Ok(())
    }

    /// First letter of the display name, used for avatar badges
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Random hue at fixed saturation/lightness so every identity stays readable
/// on a white card
pub fn random_accent_color() -> String {
    let hue = rand::rng().random_range(0..360);
    format!("hsl({}, 70%, 60%)", hue)
}
