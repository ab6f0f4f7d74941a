pub mod archive;
pub mod config;
pub mod prefs;
pub mod session;
pub mod testing;

pub use archive::{
    AdvancedSearchClient, ArchiveError, ArchiveItem, ArchiveSearcher, FlexList, ItemLinks,
    MediaType, SearchRequest, PAGE_SIZE, SEARCH_FIELDS,
};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, ArchiveConfig,
    Config, ConfigError, StorageConfig, UiConfig,
};
pub use prefs::{PreferenceStore, SqlitePreferenceStore, StoreError};
pub use session::{SearchSession, SearchTicket};
