//! Preferred translation language per Discord user.
//!
//! Persisted as `users.json`, a flat `user-id → language-code` object rewritten whole on
//! every change.

use std::{collections::BTreeMap, path::PathBuf};

use tokio::sync::RwLock;

use crate::server::{
    data::json_file::{read_json, write_json_atomic},
    error::AppError,
};

/// Repository for stored language preferences.
///
/// Held behind an `RwLock` so command handlers running on different gateway events can
/// read concurrently while writes are serialized.
pub struct UserLanguageRepository {
    path: PathBuf,
    users: RwLock<BTreeMap<String, String>>,
}

impl UserLanguageRepository {
    /// Loads preferences from disk.
    ///
    /// A missing or corrupt file starts an empty map and is rewritten as `{}`.
    ///
    /// # Arguments
    /// - `path` - Location of `users.json`
    ///
    /// # Returns
    /// - `UserLanguageRepository` - Repository with the loaded preferences
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let users = match read_json::<BTreeMap<String, String>>(&path) {
            Ok(Some(users)) => {
                tracing::info!(
                    "Loaded {} language preferences from {}",
                    users.len(),
                    path.display()
                );
                users
            }
            Ok(None) | Err(_) => {
                tracing::warn!("{} not found or invalid, creating new", path.display());
                let users = BTreeMap::new();
                if let Err(e) = write_json_atomic(&path, &users) {
                    tracing::error!("Failed to initialize {}: {}", path.display(), e);
                }
                users
            }
        };

        Self {
            path,
            users: RwLock::new(users),
        }
    }

    /// Stored language of a user.
    ///
    /// # Arguments
    /// - `user_id` - Discord user id
    ///
    /// # Returns
    /// - `Some(String)` - Stored language code
    /// - `None` - User never set a preference
    pub async fn get(&self, user_id: u64) -> Option<String> {
        self.users.read().await.get(&user_id.to_string()).cloned()
    }

    /// Stores a user's language and rewrites the file.
    ///
    /// The in-memory map is updated even when the write fails, so the preference applies
    /// for the rest of the process lifetime.
    ///
    /// # Arguments
    /// - `user_id` - Discord user id
    /// - `language` - Already validated language code
    ///
    /// # Returns
    /// - `Ok(())` - Preference stored and persisted
    /// - `Err(AppError)` - Persisting failed
    pub async fn set(&self, user_id: u64, language: &str) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        users.insert(user_id.to_string(), language.to_lowercase());

        write_json_atomic(&self.path, &*users)
    }
}
