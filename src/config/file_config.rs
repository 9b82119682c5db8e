//! Configuration file support.
//!
//! Settings are layered: compiled defaults, then a TOML file, then
//! `PUBFETCH_*` environment variables (`__` separates nested keys).
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 5000
//! default_author = "Brad Dicianno"
//!
//! [crossref]
//! base_url = "https://api.crossref.org"
//! rows = 1000
//! max_pages = 10
//! max_total_time_secs = 120
//! request_timeout_secs = 30
//! mailto = "you@example.org"
//!
//! [filter]
//! family = "dicianno"
//! given = "brad"
//! ```
//!
//! ```bash
//! export PUBFETCH_SERVER__PORT=9000
//! export PUBFETCH_CROSSREF__MAX_PAGES=3
//! ```

use std::path::{Path, PathBuf};

use super::Config;

/// File looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "pubfetch.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "PUBFETCH";

/// Load configuration, optionally from a file.
///
/// A `path` that does not exist is an error; environment variables are always applied.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    load_config_with_env(path, None)
}

/// Like [`load_config`], reading overrides from `env` instead of the process
/// environment when it is given.
fn load_config_with_env(
    path: Option<&Path>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?;

    settings.try_deserialize()
}

/// Find a config file in the default locations.
///
/// Checks `./pubfetch.toml`, then `<config dir>/pubfetch/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("pubfetch").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl Config {
    /// Write the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}
