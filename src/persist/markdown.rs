//! Markdown contact table.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::engine::session::SessionReport;

use super::{PersistResult, ReportSink, sibling_path};

const UNKNOWN: &str = "Unknown";
const NO_DISTANCE: &str = "N/A";

/// Writes `<log>.md` with one table row per contact.
#[derive(Debug, Default)]
pub struct MarkdownReportSink;

impl MarkdownReportSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }

    /// Renders the table. The RST column carries the logged comment.
    pub fn render(report: &SessionReport) -> String {
        let mut out = String::new();
        out.push_str("# SOTA Contacts\n\n");
        out.push_str("| Callsign | Band | QTH | RST | Distance (km) |\n");
        out.push_str("|----------|------|-----|---------|--------------|\n");

        for q in &report.qsos {
            let distance = q
                .distance_km
                .map_or_else(|| NO_DISTANCE.to_string(), |d| d.to_string());
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                cell(q.callsign.as_deref().unwrap_or(UNKNOWN)),
                cell(q.band.as_deref().unwrap_or(UNKNOWN)),
                cell(or_unknown(&q.qth)),
                cell(or_unknown(&q.comment)),
                distance,
            );
        }
        out
    }
}

impl ReportSink for MarkdownReportSink {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn write_report(&mut self, source: &Path, report: &SessionReport) -> PersistResult<PathBuf> {
        let path = sibling_path(source, "md");
        std::fs::write(&path, Self::render(report))?;
        Ok(path)
    }
}

fn or_unknown(s: &str) -> &str {
    if s.is_empty() { UNKNOWN } else { s }
}

// Pipes would split the cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|")
}
