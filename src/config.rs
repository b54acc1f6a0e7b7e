use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration, read from `imagesync.toml`.
///
/// Environment variables override file values so deployments can inject
/// credentials without editing the file:
/// `IMAGESYNC_PHOTO_ACCESS_KEY`, `IMAGESYNC_PHOTO_BASE_URL`,
/// `IMAGESYNC_STORE_APP_ID`, `IMAGESYNC_STORE_BASE_URL`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub photo_api: PhotoApiConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoApiConfig {
    #[serde(default = "default_photo_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeConfig {
    #[serde(default = "default_store_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub app_id: String,
}

fn default_photo_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_store_base_url() -> String {
    "https://live.imagesync.dev".to_string()
}

impl Default for PhotoApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_photo_base_url(),
            access_key: String::new(),
        }
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_base_url(),
            app_id: String::new(),
        }
    }
}

impl AppConfig {
    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable. Never fails: a misconfigured install still
    /// starts and surfaces request errors instead.
    pub fn load() -> Self {
        let path = config_path();
        let mut config = match std::fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<AppConfig>(&raw) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Ignoring invalid config {}: {}", path.display(), e);
                    AppConfig::default()
                }
            },
            Err(e) => {
                log::info!("No config file at {} ({}), using defaults", path.display(), e);
                AppConfig::default()
            }
        };

        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("IMAGESYNC_PHOTO_BASE_URL") {
            self.photo_api.base_url = value;
        }
        if let Ok(value) = std::env::var("IMAGESYNC_PHOTO_ACCESS_KEY") {
            self.photo_api.access_key = value;
        }
        if let Ok(value) = std::env::var("IMAGESYNC_STORE_BASE_URL") {
            self.realtime.base_url = value;
        }
        if let Ok(value) = std::env::var("IMAGESYNC_STORE_APP_ID") {
            self.realtime.app_id = value;
        }
    }
}

fn config_path() -> PathBuf {
    match std::env::var("IMAGESYNC_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("imagesync.toml"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [photo_api]
            base_url = "https://photos.internal"
            access_key = "abc123"

            [realtime]
            base_url = "https://live.internal"
            app_id = "app-1"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.photo_api.base_url, "https://photos.internal");
        assert_eq!(config.photo_api.access_key, "abc123");
        assert_eq!(config.realtime.app_id, "app-1");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let raw = r#"
            [photo_api]
            access_key = "abc123"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.photo_api.base_url, "https://api.unsplash.com");
        assert_eq!(config.realtime.base_url, "https://live.imagesync.dev");
        assert!(config.realtime.app_id.is_empty());
    }
}
