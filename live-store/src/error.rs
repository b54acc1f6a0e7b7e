/// Error type for realtime store operations
#[derive(Debug)]
pub enum StoreError {
    Network(String),
    Json(String),
    Server(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Network(msg) => write!(f, "Network error: {}", msg),
            StoreError::Json(msg) => write!(f, "JSON error: {}", msg),
            StoreError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
