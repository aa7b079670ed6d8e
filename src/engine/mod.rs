//! Enrichment pipeline: position resolution and per-session orchestration.

/// Session enricher and its lazy contact stream.
pub mod enricher;
/// Summit-or-locator position resolution.
pub mod resolver;
/// Logging-station context and session report.
pub mod session;
