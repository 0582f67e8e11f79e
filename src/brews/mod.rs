//! Brew records and their storage.
//!
//! - [`Brew`]: a pot of coffee somebody announced
//! - [`BrewRepository`]: the storage operations command handlers depend on
//! - [`BrewStore`]: in-memory implementation, persisted periodically to disk
//! - [`BrewLoader`]: loads and saves the brew list as JSON
//!
//! # Example Usage
//!
//! ```no_run
//! use brewbot::brews::{Brew, BrewRepository, BrewStore};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = BrewStore::new("brews".to_string()).await;
//! store.start_persistence_task();
//!
//! store.save(Brew::new("Blue Heeler", "alice", chrono::Utc::now())).await?;
//! let open = store.find_open().await?;
//! # Ok(())
//! # }
//! ```

mod brew;
mod brew_loader;
mod brew_store;

pub use crate::brews::brew_loader::BrewLoader;
#[cfg(test)]
pub use crate::brews::brew_store::MockBrewRepository;
pub use crate::brews::{
    brew::Brew,
    brew_store::{BrewRepository, BrewStore},
};
