//! GeoJSON contact markers for map views.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::engine::session::SessionReport;
use crate::types::Degrees;

use super::{PersistResult, ReportSink, sibling_path};

/// Marker role of the logging station.
pub const ROLE_OBSERVER: &str = "observer";
/// Marker role of a worked station.
pub const ROLE_CONTACT: &str = "contact";

#[derive(Debug, Serialize)]
struct FeatureCollection<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Feature<'a>>,
}

#[derive(Debug, Serialize)]
struct Feature<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Point,
    properties: MarkerProperties<'a>,
}

#[derive(Debug, Serialize)]
struct Point {
    #[serde(rename = "type")]
    kind: &'static str,
    /// GeoJSON order: longitude first.
    coordinates: [Degrees; 2],
}

#[derive(Debug, Serialize)]
struct MarkerProperties<'a> {
    role: &'static str,
    callsign: &'a str,
    locator: &'a str,
    sota_ref: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_km: Option<i64>,
}

fn feature(lat: Degrees, lon: Degrees, properties: MarkerProperties<'_>) -> Feature<'_> {
    Feature {
        kind: "Feature",
        geometry: Point {
            kind: "Point",
            coordinates: [lon, lat],
        },
        properties,
    }
}

/// Writes `<log>.geojson`: one point for the logging station and one per
/// contact with a resolved position. Unresolved contacts are left out.
#[derive(Debug, Default)]
pub struct MarkerReportSink;

impl MarkerReportSink {
    /// Creates the sink.
    pub fn new() -> Self {
        Self
    }

    /// Serializes the markers of `report` into `out`.
    pub fn write_to<W: Write>(out: W, report: &SessionReport) -> PersistResult<()> {
        let mut features = Vec::with_capacity(report.qsos.len() + 1);

        if let (Some(lat), Some(lon)) = (report.my_lat, report.my_lon) {
            features.push(feature(
                lat,
                lon,
                MarkerProperties {
                    role: ROLE_OBSERVER,
                    callsign: &report.my_callsign,
                    locator: &report.my_locator,
                    sota_ref: &report.my_sota,
                    distance_km: None,
                },
            ));
        }

        for q in &report.qsos {
            let (Some(lat), Some(lon)) = (q.lat, q.lon) else {
                continue;
            };
            features.push(feature(
                lat,
                lon,
                MarkerProperties {
                    role: ROLE_CONTACT,
                    callsign: q.callsign.as_deref().unwrap_or_default(),
                    locator: &q.locator,
                    sota_ref: &q.sota_ref,
                    distance_km: q.distance_km,
                },
            ));
        }

        let collection = FeatureCollection {
            kind: "FeatureCollection",
            features,
        };
        serde_json::to_writer_pretty(out, &collection)?;
        Ok(())
    }
}

impl ReportSink for MarkerReportSink {
    fn name(&self) -> &'static str {
        "markers"
    }

    fn write_report(&mut self, source: &Path, report: &SessionReport) -> PersistResult<PathBuf> {
        let path = sibling_path(source, "geojson");
        let mut out = BufWriter::new(File::create(&path)?);
        Self::write_to(&mut out, report)?;
        out.flush()?;
        Ok(path)
    }
}
