use crate::models::Photo;

/// Error type for photo API operations
#[derive(Debug)]
pub enum PhotoApiError {
    Network(String),
    Json(String),
    Server(String),
}

impl std::fmt::Display for PhotoApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoApiError::Network(msg) => write!(f, "Network error: {}", msg),
            PhotoApiError::Json(msg) => write!(f, "JSON error: {}", msg),
            PhotoApiError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for PhotoApiError {}

/// Photo listing service client
#[derive(Clone)]
pub struct PhotoApiClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl PhotoApiClient {
    /// Create a new client for the given API endpoint and client credential
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Result<Self, PhotoApiError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("PhotoApi/0.1.0")
            .build()
            .map_err(|e| PhotoApiError::Network(format!("Client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            access_key: access_key.into(),
        })
    }

    fn auth_header(&self) -> String {
        format!("Client-ID {}", self.access_key)
    }

    /// Fetch one page of the photo listing
    pub async fn list_photos(&self, page: u32, per_page: u32) -> Result<Vec<Photo>, PhotoApiError> {
        let url = format!("{}/photos", self.base_url.trim_end_matches('/'));

        log::debug!("Fetching photo page {} ({} per page)", page, per_page);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .query(&[("page", page), ("per_page", per_page)])
            .send()
            .await
            .map_err(|e| PhotoApiError::Network(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PhotoApiError::Server(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Photo>>()
            .await
            .map_err(|e| PhotoApiError::Json(format!("Failed to parse listing: {}", e)))
    }

    /// Fetch a single photo by its API id
    pub async fn get_photo(&self, id: &str) -> Result<Photo, PhotoApiError> {
        let url = format!("{}/photos/{}", self.base_url.trim_end_matches('/'), id);

        let response = self
            .http
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| PhotoApiError::Network(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PhotoApiError::Server(format!(
                "Server returned status: {}",
                response.status()
            )));
        }

        response
            .json::<Photo>()
            .await
            .map_err(|e| PhotoApiError::Json(format!("Failed to parse photo: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_build() {
        let client = PhotoApiClient::new("https://api.example.com/", "test-key").unwrap();
        assert_eq!(client.auth_header(), "Client-ID test-key");
    }

    #[test]
    fn test_error_display() {
        let err = PhotoApiError::Server("Server returned status: 503".to_string());
        assert!(err.to_string().contains("503"));
    }
}
