use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration. Every section has working defaults, so running with
/// no config file at all is supported.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote archive endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Advanced-search endpoint.
    #[serde(default = "default_search_url")]
    pub search_url: String,
    /// Base URL for the embeddable item viewer.
    #[serde(default = "default_viewer_base_url")]
    pub viewer_base_url: String,
    /// Base URL for the item page.
    #[serde(default = "default_details_base_url")]
    pub details_base_url: String,
    /// Base URL for the downloadable item archive.
    #[serde(default = "default_download_base_url")]
    pub download_base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            viewer_base_url: default_viewer_base_url(),
            details_base_url: default_details_base_url(),
            download_base_url: default_download_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_search_url() -> String {
    "https://archive.org/advancedsearch.php".to_string()
}

fn default_viewer_base_url() -> String {
    "https://archive.org/embed".to_string()
}

fn default_details_base_url() -> String {
    "https://archive.org/details".to_string()
}

fn default_download_base_url() -> String {
    "https://archive.org/compress".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Preference database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("voyager.db")
}

/// Interface tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Quiet period after the last filter edit before a search fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    300
}
