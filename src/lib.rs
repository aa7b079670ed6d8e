//! Geographic enrichment of amateur-radio contact logs.
//!
//! Each contact's position is resolved from a summit reference (via a
//! [`summit::SummitLookup`]) or a Maidenhead grid locator, and its distance
//! to the logging station is attached.
//!
//! # Examples
//!
//! Decoding a locator:
//! ```
//! use qsogeo::core::locator::decode;
//!
//! let c = decode("JJ00").expect("valid locator");
//! assert_eq!((c.lat, c.lon), (0.0, 0.0));
//! ```
//!
//! Enriching a session with an offline summit table:
//! ```
//! use qsogeo::{
//!     adif::AdifRecord,
//!     config::EnrichConfig,
//!     engine::enricher::Enricher,
//!     qso::ContactRecord,
//!     summit::{StaticSummitTable, SummitLocation},
//! };
//!
//! let summits = StaticSummitTable::new().with("G/LD-001", SummitLocation::new(54.454, -3.212));
//! let records = vec![ContactRecord::from_adif(
//!     &AdifRecord::new()
//!         .with("CALL", "M0ABC")
//!         .with("BAND", "20m")
//!         .with("MY_GRIDSQUARE", "IO84")
//!         .with("SOTA_REF", "G/LD-001"),
//! )];
//!
//! let enricher = Enricher::new(summits, EnrichConfig::default());
//! let session = enricher.enrich(&records).expect("non-empty log");
//! let qso = session.qsos().next().expect("one contact");
//! assert!(qso.distance_km.is_some());
//! ```
//!
//! Processing a log file on disk:
//! ```no_run
//! use std::path::Path;
//!
//! use qsogeo::{
//!     config::{EnrichConfig, SummitApiConfig},
//!     engine::enricher::Enricher,
//!     persist::{ReportSink, json::JsonReportSink},
//!     process::process_file,
//!     summit::sota::SotaApiLookup,
//! };
//!
//! let lookup = SotaApiLookup::new(&SummitApiConfig::default()).expect("http client");
//! let enricher = Enricher::new(lookup, EnrichConfig::default());
//! let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(JsonReportSink::new())];
//! process_file(Path::new("activation.adi"), &enricher, &mut sinks).expect("processed");
//! ```
#![warn(missing_docs)]

/// ADIF log reader.
pub mod adif;
/// Configuration structs and loading.
pub mod config;
/// Locator decoding and distance math.
pub mod core;
/// Position resolution and session enrichment.
pub mod engine;
/// Report sinks.
pub mod persist;
/// Log-file discovery and processing.
pub mod process;
/// Contact records and enriched contacts.
pub mod qso;
/// Summit lookup boundary and implementations.
pub mod summit;
/// Shared coordinate types.
pub mod types;
