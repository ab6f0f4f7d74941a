//! Testing utilities and mock implementations.
//!
//! Mock implementations of the external service traits, allowing the
//! session controller and frontend to be exercised without a network or a
//! database file.

mod memory_store;
mod mock_searcher;

pub use memory_store::MemoryPreferenceStore;
pub use mock_searcher::MockSearcher;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::archive::{ArchiveItem, FlexList};

    /// Create a result record with reasonable defaults.
    pub fn item(identifier: &str, title: &str) -> ArchiveItem {
        ArchiveItem {
            identifier: identifier.to_string(),
            title: Some(title.to_string()),
            creator: Some(FlexList::One("Secondhand Prose".to_string())),
            year: Some("1968".to_string()),
            mediatype: Some("texts".to_string()),
            description: Some(FlexList::One("A record used in tests.".to_string())),
        }
    }

    /// Create a film record with multiple creators.
    pub fn film(identifier: &str, title: &str, year: &str) -> ArchiveItem {
        ArchiveItem {
            identifier: identifier.to_string(),
            title: Some(title.to_string()),
            creator: Some(FlexList::Many(vec![
                "Pumpkin Pictures".to_string(),
                "Distributors Ltd".to_string(),
            ])),
            year: Some(year.to_string()),
            mediatype: Some("movies".to_string()),
            description: Some(FlexList::Many(vec![
                "Reel one.".to_string(),
                "Reel two.".to_string(),
            ])),
        }
    }
}
