//! Internet Archive advanced-search client.
//!
//! One GET per search, fixed page size, first page only. No retries; the
//! transport timeout is the only bound.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ArchiveConfig;

use super::types::{ArchiveItem, MediaType, SearchRequest};
use super::{ArchiveError, ArchiveSearcher};

/// Fields requested from the search endpoint for every result record.
pub const SEARCH_FIELDS: &str = "identifier,title,creator,year,mediatype,description";

/// Fixed page size; only the first page is ever fetched.
pub const PAGE_SIZE: u32 = 50;

/// Search client for the archive's advanced-search endpoint.
pub struct AdvancedSearchClient {
    client: Client,
    search_url: String,
}

impl AdvancedSearchClient {
    pub fn new(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            search_url: config.search_url.trim_end_matches('/').to_string(),
        })
    }

    /// Conjunction of whichever filter parts are present. The mediatype
    /// clause is omitted entirely for `All`.
    fn build_query_expression(request: &SearchRequest) -> String {
        let mut parts = Vec::new();

        let query = request.query.trim();
        if !query.is_empty() {
            parts.push(urlencoding::encode(query).into_owned());
        }

        if request.media_type != MediaType::All {
            parts.push(format!("mediatype:({})", request.media_type.as_str()));
        }

        let creator = request.creator.trim();
        if !creator.is_empty() {
            parts.push(format!("creator:({})", urlencoding::encode(creator)));
        }

        parts.join(" AND ")
    }

    fn build_search_url(&self, expression: &str) -> String {
        format!(
            "{}?q={}&fl[]={}&rows={}&page=1&output=json",
            self.search_url, expression, SEARCH_FIELDS, PAGE_SIZE
        )
    }

    /// Pull the record list out of the response body. An absent or
    /// malformed `response.docs` path yields an empty list, not an error.
    fn extract_docs(body: &serde_json::Value) -> Vec<ArchiveItem> {
        body.pointer("/response/docs")
            .and_then(|docs| serde_json::from_value(docs.clone()).ok())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ArchiveSearcher for AdvancedSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<ArchiveItem>, ArchiveError> {
        if !request.is_searchable() {
            return Err(ArchiveError::EmptyQuery);
        }

        let expression = Self::build_query_expression(request);
        let url = self.build_search_url(&expression);
        debug!(q = %expression, "archive search");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArchiveError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        let docs = Self::extract_docs(&body);
        debug!(results = docs.len(), "archive search complete");

        Ok(docs)
    }
}
