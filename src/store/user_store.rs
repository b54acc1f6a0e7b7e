use crate::error::AppError;
use crate::models::User;
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "user-profile.json";

/// Returns the app data directory (for the identity file)
fn app_data_dir() -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join("data"))
        .unwrap_or_else(|_| PathBuf::from("./data"))
}

fn default_profile_path() -> PathBuf {
    app_data_dir().join(PROFILE_FILE)
}

/// Partial identity update; unset fields keep their current value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub avatar: Option<String>,
}

/// Persistent per-install identity.
///
/// One instance lives for the whole process and is handed to components via
/// context; only the explicit setters below mutate it (single-writer
/// contract). The payload is one JSON file, restored verbatim on startup.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStore {
    user: User,
    path: PathBuf,
}

impl UserStore {
    /// Restore the identity from disk, or synthesize and persist a fresh one
    pub fn load_or_create() -> Self {
        Self::load_from(default_profile_path())
    }

    pub fn load_from(path: PathBuf) -> Self {
        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    log::debug!("Restored identity {} from {}", user.id, path.display());
                    return Self { user, path };
                }
                Err(e) => {
                    log::warn!("Discarding unreadable identity file {}: {}", path.display(), e);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                log::warn!("Failed to read identity file {}: {}", path.display(), e);
            }
        }

        let store = Self {
            user: User::generate(),
            path,
        };
        if let Err(e) = store.persist() {
            log::error!("Failed to persist fresh identity: {}", e);
        }
        store
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Rename the identity and re-persist
    pub fn set_user_name(&mut self, name: &str) -> Result<(), AppError> {
        self.update_user(UserPatch {
            name: Some(name.to_string()),
            ..UserPatch::default()
        })
    }

    /// Shallow-merge a patch into the identity and re-persist.
    /// The id is never replaced.
    pub fn update_user(&mut self, patch: UserPatch) -> Result<(), AppError> {
        let mut updated = self.user.clone();
        if let Some(name) = patch.name {
            updated.name = name.trim().to_string();
        }
        if let Some(color) = patch.color {
            updated.color = color;
        }
        if let Some(avatar) = patch.avatar {
            updated.avatar = avatar;
        }

        updated.validate()?;

        self.user = updated;
        self.persist()
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.user)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> Result<(), AppError> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_profile_path() -> PathBuf {
        std::env::temp_dir().join(format!("imagesync-test-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_fresh_identity_is_persisted_and_restored() {
        let path = temp_profile_path();

        let first = UserStore::load_from(path.clone());
        let second = UserStore::load_from(path.clone());
        assert_eq!(first.user(), second.user());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rename_survives_reload() {
        let path = temp_profile_path();

        let mut store = UserStore::load_from(path.clone());
        store.set_user_name("  Ada  ").unwrap();
        assert_eq!(store.user().name, "Ada");

        let reloaded = UserStore::load_from(path.clone());
        assert_eq!(reloaded.user().name, "Ada");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let path = temp_profile_path();

        let mut store = UserStore::load_from(path.clone());
        let original_id = store.user().id.clone();
        let original_name = store.user().name.clone();

        store
            .update_user(UserPatch {
                color: Some("hsl(120, 70%, 60%)".to_string()),
                ..UserPatch::default()
            })
            .unwrap();

        assert_eq!(store.user().id, original_id);
        assert_eq!(store.user().name, original_name);
        assert_eq!(store.user().color, "hsl(120, 70%, 60%)");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_rename_is_rejected_and_not_persisted() {
        let path = temp_profile_path();

        let mut store = UserStore::load_from(path.clone());
        let original_name = store.user().name.clone();
        assert!(store.set_user_name("   ").is_err());
        assert_eq!(store.user().name, original_name);

        let reloaded = UserStore::load_from(path.clone());
        assert_eq!(reloaded.user().name, original_name);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_replaced() {
        let path = temp_profile_path();
        std::fs::write(&path, "not json at all").unwrap();

        let store = UserStore::load_from(path.clone());
        store.user().validate().unwrap();

        std::fs::remove_file(&path).unwrap();
    }
}
