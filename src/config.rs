//! Configuration for lookups, enrichment and report output.
//!
//! Every struct deserializes with `#[serde(default)]`, so a JSON file only
//! needs the keys it overrides.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::distance::DistanceMethod;

/// Default SOTA summit API endpoint; the reference is appended as a path
/// segment.
pub const DEFAULT_SOTA_API_URL: &str = "https://api-db2.sota.org.uk/api/summits";

/// Summit API client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummitApiConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for SummitApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOTA_API_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("qsogeo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Enrichment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    /// Strategy for contacts where both stations were located by summit
    /// lookup. `None` keeps the per-record haversine default.
    pub s2s_method: Option<DistanceMethod>,
}

/// Report sinks to write for each log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write `<log>.json` next to the log.
    pub json: bool,
    /// Write `<log>.md` next to the log.
    pub markdown: bool,
    /// Write `<log>.geojson` contact markers next to the log.
    pub markers: bool,
    /// Append every session to this SQLite database.
    pub sqlite_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: true,
            markdown: false,
            markers: false,
            sqlite_path: None,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Summit API client settings.
    pub summit_api: SummitApiConfig,
    /// Enrichment settings.
    pub enrich: EnrichConfig,
    /// Report sinks.
    pub output: OutputConfig,
}

/// Configuration file could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(std::io::Error),
    /// File is not valid configuration JSON.
    Parse(serde_json::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config: {e}"),
            Self::Parse(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    /// Parses configuration JSON, filling missing keys with defaults.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
