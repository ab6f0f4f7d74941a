//! Mock searcher for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::archive::{ArchiveError, ArchiveItem, ArchiveSearcher, SearchRequest};

/// Mock implementation of the `ArchiveSearcher` trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable result records
/// - Track search requests for assertions
/// - Inject failures
pub struct MockSearcher {
    /// Configured results to return.
    results: Arc<RwLock<Vec<ArchiveItem>>>,
    /// Recorded search requests.
    searches: Arc<RwLock<Vec<SearchRequest>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<ArchiveError>>>,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher with empty results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the results to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<ArchiveItem>) {
        *self.results.write().await = results;
    }

    /// Get recorded search requests.
    pub async fn recorded_searches(&self) -> Vec<SearchRequest> {
        self.searches.read().await.clone()
    }

    /// Get the number of searches performed.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: ArchiveError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl ArchiveSearcher for MockSearcher {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ArchiveItem>, ArchiveError> {
        // Same up-front rejection as the real client: no call is recorded.
        if !request.is_searchable() {
            return Err(ArchiveError::EmptyQuery);
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.searches.write().await.push(request.clone());

        Ok(self.results.read().await.clone())
    }
}
