use serde::{Deserialize, Serialize};

/// One photo as returned by the listing API.
///
/// Photos are read-only: they are never persisted by this system, and their
/// identity is the API's own `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub alt_description: Option<String>,
    pub urls: PhotoUrls,
    pub user: PhotoAuthor,
    #[serde(default)]
    pub links: PhotoLinks,
}

impl Photo {
    /// Display description with a fallback for photos without alt text.
    pub fn description(&self) -> &str {
        self.alt_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("Untitled photo")
    }
}

/// Size variants of one photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoUrls {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub full: Option<String>,
    pub regular: String,
    pub small: String,
    #[serde(default)]
    pub thumb: Option<String>,
}

/// The photographer credited by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoAuthor {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_image: Option<ProfileImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileImage {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// External links attached to a photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PhotoLinks {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub download: Option<String>,
}
