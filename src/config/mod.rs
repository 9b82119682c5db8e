//! Configuration management.

mod file_config;

pub use file_config::{find_config_file, load_config, ConfigFileError, CONFIG_FILE_NAME, ENV_PREFIX};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Inbound HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// CrossRef API settings
    #[serde(default)]
    pub crossref: CrossRefConfig,

    /// Author filter tokens
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Author queried when `/fetch-publications` has no `author` parameter
    #[serde(default = "default_author")]
    pub default_author: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_author: default_author(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_author() -> String {
    "Brad Dicianno".to_string()
}

/// CrossRef API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossRefConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size for each request
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Upper bound on pages fetched per query
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Upper bound on wall time spent paginating one query
    #[serde(default = "default_max_total_time")]
    pub max_total_time_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Contact address sent in the user agent (CrossRef polite pool)
    #[serde(default)]
    pub mailto: Option<String>,
}

impl Default for CrossRefConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            rows: default_rows(),
            max_pages: default_max_pages(),
            max_total_time_secs: default_max_total_time(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            mailto: None,
        }
    }
}

impl CrossRefConfig {
    pub fn max_total_time(&self) -> Duration {
        Duration::from_secs(self.max_total_time_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.crossref.org".to_string()
}

fn default_rows() -> usize {
    1000
}

// CrossRef rejects offsets above 10000
fn default_max_pages() -> usize {
    10
}

fn default_max_total_time() -> u64 {
    120
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// Tokens an author entry must contain to be kept.
///
/// These are fixed per deployment and are not derived from the `author` query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_family")]
    pub family: String,

    #[serde(default = "default_given")]
    pub given: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            family: default_family(),
            given: default_given(),
        }
    }
}

fn default_family() -> String {
    "dicianno".to_string()
}

fn default_given() -> String {
    "brad".to_string()
}
