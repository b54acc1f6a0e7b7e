use std::fmt;

/// Central error types for the ImageSync app
#[derive(Debug)]
pub enum AppError {
    /// Photo listing API failure (network, protocol or server)
    PhotoApi(photo_api::PhotoApiError),
    /// Realtime store failure (network, protocol or server)
    Store(live_store::StoreError),
    /// Validation error (e.g. invalid inputs)
    Validation(String),
    /// Local persistence error (identity file, config file)
    Persistence(std::io::Error),
    /// Serialization error
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::PhotoApi(e) => write!(f, "Photo API error: {}", e),
            AppError::Store(e) => write!(f, "Realtime store error: {}", e),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Persistence(e) => write!(f, "Persistence error: {}", e),
            AppError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<photo_api::PhotoApiError> for AppError {
    fn from(e: photo_api::PhotoApiError) -> Self {
        AppError::PhotoApi(e)
    }
}

impl From<live_store::StoreError> for AppError {
    fn from(e: live_store::StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Persistence(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e)
    }
}

/// User-friendly error messages for UI surfaces
impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::PhotoApi(_) => {
                "Failed to load photos. Please check your connection or try again later.".to_string()
            }
            AppError::Store(_) => "Could not reach the live backend. Please try again.".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Persistence(_) => "Error accessing local app data.".to_string(),
            AppError::Serialization(_) => "Error reading stored app data.".to_string(),
        }
    }
}
