//! Best-effort persisted preferences.
//!
//! A thin string key/value boundary: the session saves its filter state and
//! last result set here and restores them at startup. Persistence never
//! gets in the way of the running session; save failures are logged and
//! swallowed, and absent or corrupt values fall back to defaults.

mod sqlite;

pub use sqlite::SqlitePreferenceStore;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::warn;

/// Logical keys used by the search session.
pub mod keys {
    /// Free-text search term.
    pub const QUERY: &str = "search_term";
    /// Creator filter text.
    pub const CREATOR: &str = "creator_term";
    /// Media-type filter code.
    pub const MEDIA_TYPE: &str = "media_type";
    /// JSON-encoded last result set.
    pub const RESULTS: &str = "search_results";
}

/// Errors raised while opening a store. Read/write failures after opening
/// are contained inside the store and never surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
}

/// String key/value store with best-effort persistence.
///
/// `save` must never propagate failure to the caller; implementations log
/// and continue. `load` returns `None` for absent keys and for read
/// failures alike.
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

/// Load a string value, falling back when absent.
pub fn load_or(store: &dyn PreferenceStore, key: &str, fallback: &str) -> String {
    store.load(key).unwrap_or_else(|| fallback.to_string())
}

/// Load a JSON-encoded value; absent or corrupt values yield the default.
pub fn load_json_or_default<T>(store: &dyn PreferenceStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(key) {
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "discarding corrupt persisted value");
            T::default()
        }),
        None => T::default(),
    }
}

/// Serialize and save a value; an encoding failure is logged and dropped.
pub fn save_json<T: Serialize>(store: &dyn PreferenceStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.save(key, &raw),
        Err(e) => warn!(key, error = %e, "failed to encode value for persistence"),
    }
}
