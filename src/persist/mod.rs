/// JSON report files.
pub mod json;
/// Markdown contact tables.
pub mod markdown;
/// GeoJSON contact markers.
pub mod markers;
/// SQLite session archive.
pub mod sqlite;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::engine::session::SessionReport;

/// Report could not be written.
#[derive(Debug)]
pub enum PersistError {
    /// SQLite failure.
    Sqlite(rusqlite::Error),
    /// JSON serialization failure.
    Serde(serde_json::Error),
    /// File system failure.
    Io(std::io::Error),
    /// Any other failure.
    Message(String),
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

impl From<std::io::Error> for PersistError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(e) => write!(f, "sqlite: {e}"),
            Self::Serde(e) => write!(f, "json: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Message(m) => f.write_str(m),
        }
    }
}

impl std::error::Error for PersistError {}

/// Result alias for sinks.
pub type PersistResult<T> = Result<T, PersistError>;

/// Destination for enriched session reports.
pub trait ReportSink {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Writes the report produced from the log at `source`. Returns where it
    /// was written.
    fn write_report(&mut self, source: &Path, report: &SessionReport) -> PersistResult<PathBuf>;

    /// Makes previously written reports durable.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}

/// `source` with its extension replaced by `ext`.
pub fn sibling_path(source: &Path, ext: &str) -> PathBuf {
    source.with_extension(ext)
}
