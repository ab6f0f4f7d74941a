use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Default config file name, used when no explicit path is given.
const DEFAULT_CONFIG_FILE: &str = "voyager.toml";

fn figment_with(file: Option<&Path>) -> Figment {
    let mut figment = Figment::new();
    if let Some(path) = file {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(Env::prefixed("VOYAGER_").split("_"))
}

/// Load configuration from an explicit file with environment variable
/// overrides.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    figment_with(Some(path))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration without an explicit path: the default config file is
/// merged when present, otherwise built-in defaults apply. Environment
/// overrides are honored either way.
pub fn load_default_config() -> Result<Config, ConfigError> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let file = default_path.exists().then_some(default_path);

    figment_with(file)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
