//! Archive search abstraction.
//!
//! This module provides the `ArchiveSearcher` trait for querying a remote
//! content archive, the `AdvancedSearchClient` implementation backed by the
//! Internet Archive's advanced-search endpoint, and the result record model.

mod client;
mod links;
mod types;

pub use client::{AdvancedSearchClient, PAGE_SIZE, SEARCH_FIELDS};
pub use links::ItemLinks;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Both the free-text term and the creator filter were blank.
    /// Rejected before any network call.
    #[error("at least one of search term or creator is required")]
    EmptyQuery,

    /// Transport-level failure (connect, timeout, body decode).
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("search failed with status {status}")]
    Status { status: u16 },
}

/// Trait for archive search backends.
#[async_trait]
pub trait ArchiveSearcher: Send + Sync {
    /// Execute one search, first page only.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ArchiveItem>, ArchiveError>;
}
