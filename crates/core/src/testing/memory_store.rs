//! In-memory preference store for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tracing::warn;

use crate::prefs::PreferenceStore;

/// HashMap-backed store with a switch to simulate write failures, as a
/// full or unavailable backing store would produce.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
    fail_saves: AtomicBool,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail silently.
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Copy of everything currently stored, for assertions.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values.lock().unwrap().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if self.fail_saves.load(Ordering::SeqCst) {
            warn!(key, "preference write failed");
            return;
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let store = MemoryPreferenceStore::new();
        store.save("search_term", "moby dick");
        assert_eq!(store.load("search_term"), Some("moby dick".to_string()));
        assert_eq!(store.load("missing"), None);
    }

    #[test]
    fn test_fail_saves_drops_writes() {
        let store = MemoryPreferenceStore::new();
        store.save("kept", "1");
        store.fail_saves(true);
        store.save("dropped", "2");

        assert_eq!(store.load("kept"), Some("1".to_string()));
        assert_eq!(store.load("dropped"), None);
    }
}
