//! Per-file processing: read a log, enrich it, hand the report to sinks.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    adif::{AdifError, read_adif_file},
    engine::{
        enricher::{EnrichError, Enricher},
        session::SessionReport,
    },
    persist::{PersistError, ReportSink},
    qso::ContactRecord,
    summit::SummitLookup,
};

/// Extension of ADIF log files, matched case-insensitively.
pub const LOG_EXTENSION: &str = "adi";

/// One log file could not be processed.
#[derive(Debug)]
pub enum ProcessError {
    /// The log could not be read or parsed.
    Adif(AdifError),
    /// The log is empty.
    Enrich(EnrichError),
    /// A sink failed.
    Persist(PersistError),
}

impl From<AdifError> for ProcessError {
    fn from(value: AdifError) -> Self {
        Self::Adif(value)
    }
}

impl From<EnrichError> for ProcessError {
    fn from(value: EnrichError) -> Self {
        Self::Enrich(value)
    }
}

impl From<PersistError> for ProcessError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adif(e) => write!(f, "adif: {e}"),
            Self::Enrich(e) => write!(f, "enrich: {e}"),
            Self::Persist(e) => write!(f, "output: {e}"),
        }
    }
}

impl std::error::Error for ProcessError {}

/// `path` itself when it is a file, otherwise every `.adi` file beneath it
/// in sorted order.
pub fn find_logs(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut logs: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_log_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    logs.sort();
    logs
}

fn is_log_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LOG_EXTENSION))
}

/// Enriches the log at `path` and writes it to every sink.
pub fn process_file<L: SummitLookup>(
    path: &Path,
    enricher: &Enricher<L>,
    sinks: &mut [Box<dyn ReportSink>],
) -> Result<SessionReport, ProcessError> {
    info!(path = %path.display(), "processing log");

    let records: Vec<ContactRecord> = read_adif_file(path)?
        .iter()
        .map(ContactRecord::from_adif)
        .collect();
    let report = enricher.enrich_report(&records)?;

    for sink in sinks.iter_mut() {
        let out = sink.write_report(path, &report)?;
        info!(sink = sink.name(), out = %out.display(), "report written");
    }

    Ok(report)
}
