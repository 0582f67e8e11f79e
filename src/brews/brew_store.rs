//! Brew repository and its in-memory, disk-backed implementation.
//!
//! Handlers only see the [`BrewRepository`] trait. The bot wires a
//! [`BrewStore`] behind it, which keeps brews in memory and periodically
//! writes them to disk through a [`BrewLoader`].

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::debug;
use mockall::automock;
use tokio::{sync::Mutex, time};

use crate::brews::{Brew, BrewLoader};

/// Interval in seconds between automatic brew persistence operations.
const SAVE_INTERVAL_SECS: u64 = 60; // 1 minute

/// Storage operations the command handlers rely on.
///
/// This trait abstracts the storage for easier testing with mocks.
#[automock]
#[async_trait]
pub trait BrewRepository: Send + Sync {
    /// Inserts a new brew or replaces the saved brew with the same id.
    ///
    /// Returns the saved brew, with its id assigned.
    async fn save(&self, brew: Brew) -> anyhow::Result<Brew>;
    /// Returns at most `limit` brews, most recent first.
    async fn find_recent(&self, limit: usize) -> anyhow::Result<Vec<Brew>>;
    /// Returns every brew not yet marked as gone.
    async fn find_open(&self) -> anyhow::Result<Vec<Brew>>;
}

/// In-memory brew storage persisted to a JSON file.
///
/// # Examples
///
/// ```no_run
/// use brewbot::brews::{Brew, BrewRepository, BrewStore};
///
/// # async fn example() -> anyhow::Result<()> {
/// let store = BrewStore::new("brews.json".to_string()).await;
/// store.start_persistence_task();
///
/// let brew = store.save(Brew::new("Blue Heeler", "alice", chrono::Utc::now())).await?;
/// assert!(brew.id.is_some());
/// # Ok(())
/// # }
/// ```
pub struct BrewStore {
    /// Thread-safe reference to the brews
    brews: Arc<Mutex<Vec<Brew>>>,
    /// Loader for persisting and loading brews from disk
    brew_loader: BrewLoader,
}

impl BrewStore {
    /// Creates a new `BrewStore` and loads existing brews from disk.
    pub async fn new(brews_path: String) -> Self {
        let brew_loader = BrewLoader::new(brews_path);
        let brews = Arc::new(Mutex::new(brew_loader.load().await));

        BrewStore { brews, brew_loader }
    }

    /// Starts a background task that periodically persists brews to disk.
    ///
    /// The task runs until the program exits.
    pub fn start_persistence_task(&self) {
        let brews = Arc::clone(&self.brews);
        let brew_loader = self.brew_loader.clone();

        tokio::spawn(async move {
            let mut interval = time::interval(Duration::from_secs(SAVE_INTERVAL_SECS));
            loop {
                interval.tick().await;
                let brews = brews.lock().await;
                brew_loader.persist_brews(&brews).await;
            }
        });
    }

    /// Writes the current brews to disk right away.
    pub async fn persist(&self) {
        let brews = self.brews.lock().await;
        self.brew_loader.persist_brews(&brews).await;
    }
}

#[async_trait]
impl BrewRepository for BrewStore {
    async fn save(&self, mut brew: Brew) -> anyhow::Result<Brew> {
        let mut brews = self.brews.lock().await;

        match brew.id {
            Some(id) => match brews.iter_mut().find(|b| b.id == Some(id)) {
                Some(saved) => *saved = brew.clone(),
                None => brews.push(brew.clone()),
            },
            None => {
                let next_id = brews.iter().filter_map(|b| b.id).max().unwrap_or(0) + 1;
                brew.id = Some(next_id);
                brews.push(brew.clone());
            }
        }

        debug!("saved brew {:?}", brew);

        Ok(brew)
    }

    async fn find_recent(&self, limit: usize) -> anyhow::Result<Vec<Brew>> {
        let mut recent = self.brews.lock().await.clone();
        recent.sort_by(|a, b| b.brewed_at.cmp(&a.brewed_at));
        recent.truncate(limit);

        Ok(recent)
    }

    async fn find_open(&self) -> anyhow::Result<Vec<Brew>> {
        let brews = self.brews.lock().await;

        Ok(brews.iter().filter(|b| !b.gone).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use tempfile::NamedTempFile;

    async fn create_empty_store() -> (BrewStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();
        (BrewStore::new(path).await, temp_file)
    }

    fn brew_at(name: &str, minute: u32) -> Brew {
        Brew::new(
            name,
            "alice",
            Utc.with_ymd_and_hms(2024, 3, 1, 8, minute, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let (store, _file) = create_empty_store().await;

        let first = store.save(brew_at("Blue Heeler", 0)).await.unwrap();
        let second = store.save(brew_at("Espresso", 5)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_save_replaces_existing_brew() {
        let (store, _file) = create_empty_store().await;

        let mut brew = store.save(brew_at("Blue Heeler", 0)).await.unwrap();
        brew.gone = true;
        store.save(brew).await.unwrap();

        let all = store.find_recent(20).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].gone);
    }

    #[tokio::test]
    async fn test_find_recent_is_most_recent_first_and_limited() {
        let (store, _file) = create_empty_store().await;
        store.save(brew_at("first", 0)).await.unwrap();
        store.save(brew_at("third", 20)).await.unwrap();
        store.save(brew_at("second", 10)).await.unwrap();

        let recent = store.find_recent(2).await.unwrap();
        let names: Vec<&str> = recent.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn test_find_open_skips_gone_brews() {
        let (store, _file) = create_empty_store().await;
        let mut gone = store.save(brew_at("old", 0)).await.unwrap();
        gone.gone = true;
        store.save(gone).await.unwrap();
        store.save(brew_at("fresh", 30)).await.unwrap();

        let open = store.find_open().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "fresh");
    }

    #[tokio::test]
    async fn test_persist_then_reload() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let store = BrewStore::new(path.clone()).await;
        store
            .save(Brew::new("Blue Heeler", "alice", Utc::now() - ChronoDuration::minutes(3)))
            .await
            .unwrap();
        store.persist().await;

        let reloaded = BrewStore::new(path).await;
        let brews = reloaded.find_recent(20).await.unwrap();
        assert_eq!(brews.len(), 1);
        assert_eq!(brews[0].name, "Blue Heeler");
        assert_eq!(brews[0].id, Some(1));
    }
}
