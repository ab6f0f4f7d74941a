//! Detail-view links for a single archive item.

use crate::config::ArchiveConfig;

/// External URLs for one item, addressed by identifier.
///
/// These point at opaque external resources; the client only constructs the
/// addresses and never parses or validates their content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLinks {
    /// Embeddable viewer for the item.
    pub viewer: String,
    /// Item page for direct opening.
    pub page: String,
    /// Downloadable archive of the item.
    pub archive_zip: String,
}

impl ItemLinks {
    pub fn build(config: &ArchiveConfig, identifier: &str) -> Self {
        let viewer = format!(
            "{}/{}",
            config.viewer_base_url.trim_end_matches('/'),
            identifier
        );
        let page = format!(
            "{}/{}",
            config.details_base_url.trim_end_matches('/'),
            identifier
        );
        let archive_zip = format!(
            "{}/{}/formats=H.264&file=/{}.zip",
            config.download_base_url.trim_end_matches('/'),
            identifier,
            identifier
        );

        Self {
            viewer,
            page,
            archive_zip,
        }
    }
}
