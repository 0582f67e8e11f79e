//! Brew record.
//!
//! This module provides the [`Brew`] struct, the small record persisted every
//! time somebody announces a fresh pot of coffee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pot of coffee brewed by somebody.
///
/// A brew is created by the public `brew` command and marked as gone by the
/// public `gone` command. Brews are never deleted.
///
/// # Examples
///
/// ```
/// # use brewbot::brews::Brew;
/// let brew = Brew::new("Blue Heeler", "alice", chrono::Utc::now());
/// assert!(brew.id.is_none());
/// assert!(!brew.gone);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brew {
    /// Identifier assigned by the repository on first save.
    ///
    /// `None` until the brew has been saved.
    #[serde(default)]
    pub id: Option<u64>,
    /// Name of the coffee, as typed by the user.
    pub name: String,
    /// When the pot was announced.
    pub brewed_at: DateTime<Utc>,
    /// Display name of the user who brewed it.
    pub brewed_by: String,
    /// Whether the pot has been declared empty.
    #[serde(default)]
    pub gone: bool,
}

impl Brew {
    /// Creates a new, unsaved and still available brew.
    pub fn new(name: &str, brewed_by: &str, brewed_at: DateTime<Utc>) -> Self {
        Brew {
            id: None,
            name: name.to_owned(),
            brewed_at,
            brewed_by: brewed_by.to_owned(),
            gone: false,
        }
    }
}
