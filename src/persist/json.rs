//! Pretty-printed JSON report next to the log file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::engine::session::SessionReport;

use super::{PersistResult, ReportSink, sibling_path};

/// Writes `<log>.json` with four-space indentation.
#[derive(Debug, Default)]
pub struct JsonReportSink;

impl JsonReportSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }

    /// Serializes `report` into `out`.
    pub fn write_to<W: Write>(out: W, report: &SessionReport) -> PersistResult<()> {
        let mut ser =
            serde_json::Serializer::with_formatter(out, PrettyFormatter::with_indent(b"    "));
        report.serialize(&mut ser)?;
        Ok(())
    }
}

impl ReportSink for JsonReportSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write_report(&mut self, source: &Path, report: &SessionReport) -> PersistResult<PathBuf> {
        let path = sibling_path(source, "json");
        let mut out = BufWriter::new(File::create(&path)?);
        Self::write_to(&mut out, report)?;
        out.flush()?;
        Ok(path)
    }
}
