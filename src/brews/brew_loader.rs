//! Brew persistence layer for loading and saving brews to disk.
//!
//! This module provides the [`BrewLoader`] for persisting brew records between
//! bot restarts. Brews are serialized to JSON and stored in a file.

use log::{error, info, warn};
use tokio::fs;

use crate::brews::brew::Brew;

/// Handles loading and persisting brews to disk.
///
/// If loading fails (file missing or corrupted), it returns an empty list
/// rather than failing, so the bot can always start.
///
/// # Examples
///
/// ```no_run
/// use brewbot::brews::BrewLoader;
///
/// # async fn example() {
/// let loader = BrewLoader::new("brews.json".to_string());
/// let brews = loader.load().await;
/// loader.persist_brews(&brews).await;
/// # }
/// ```
#[derive(Clone)]
pub struct BrewLoader {
    /// Path to the JSON file where brews are stored.
    path: String,
}

impl BrewLoader {
    /// Creates a new `BrewLoader` for the specified file path.
    pub fn new(path: String) -> Self {
        BrewLoader { path }
    }

    /// Loads brews from disk.
    ///
    /// # Error Handling
    ///
    /// - If the file doesn't exist: logs a warning and returns an empty list
    /// - If deserialization fails: logs an error and returns an empty list
    pub async fn load(&self) -> Vec<Brew> {
        let Ok(serialized_brews) = fs::read_to_string(&self.path).await else {
            warn!("no persisted brews found, starting with an empty brew list");
            return Vec::new();
        };

        let Ok(brews) = serde_json::from_str::<Vec<Brew>>(&serialized_brews) else {
            error!("failed to deserialize persisted brews, starting with an empty brew list");
            return Vec::new();
        };

        info!("loaded {} persisted brews", brews.len());

        brews
    }

    /// Persists the brews to disk.
    ///
    /// Errors are logged but not propagated, allowing the bot to keep running
    /// even if persistence fails.
    pub async fn persist_brews(&self, brews: &[Brew]) {
        let serialized_brews = match serde_json::to_string(brews) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize brews: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &serialized_brews).await {
            error!("failed to persist brews: {}", e);
            return;
        }

        info!("persisted brews");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn create_test_brew(id: u64, name: &str) -> Brew {
        Brew {
            id: Some(id),
            name: name.to_string(),
            brewed_at: Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 0).unwrap(),
            brewed_by: "alice".to_string(),
            gone: false,
        }
    }

    #[tokio::test]
    async fn test_load_nonexistent_file_returns_empty_list() {
        let loader = BrewLoader::new("nonexistent_brews.json".to_string());
        let brews = loader.load().await;

        assert!(brews.is_empty());
    }

    #[tokio::test]
    async fn test_persist_and_load_brews() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();
        let loader = BrewLoader::new(path);

        let mut gone_brew = create_test_brew(2, "Espresso");
        gone_brew.gone = true;
        let brews = vec![create_test_brew(1, "Blue Heeler"), gone_brew.clone()];
        loader.persist_brews(&brews).await;

        let loaded = loader.load().await;
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], create_test_brew(1, "Blue Heeler"));
        assert_eq!(loaded[1], gone_brew);
    }

    #[tokio::test]
    async fn test_load_corrupted_json_returns_empty_list() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        fs::write(&path, "[ this is not valid json ").await.unwrap();

        let loader = BrewLoader::new(path);
        assert!(loader.load().await.is_empty());
    }
}
