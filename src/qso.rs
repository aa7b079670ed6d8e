//! Contact records as read from a log, and their enriched form.

use serde::{Deserialize, Serialize};

use crate::{adif::AdifRecord, types::Degrees};

/// ADIF field names read by [`ContactRecord::from_adif`].
pub mod fields {
    /// Worked station callsign.
    pub const CALL: &str = "CALL";
    /// Band, e.g. `20m`.
    pub const BAND: &str = "BAND";
    /// Start time `HHMM[SS]`.
    pub const TIME_ON: &str = "TIME_ON";
    /// Worked station location text.
    pub const QTH: &str = "QTH";
    /// Worked station grid locator.
    pub const GRIDSQUARE: &str = "GRIDSQUARE";
    /// Worked station summit reference.
    pub const SOTA_REF: &str = "SOTA_REF";
    /// Free-text comment, usually the signal report.
    pub const COMMENT: &str = "COMMENT";
    /// Logging station callsign.
    pub const STATION_CALLSIGN: &str = "STATION_CALLSIGN";
    /// Logging station grid locator.
    pub const MY_GRIDSQUARE: &str = "MY_GRIDSQUARE";
    /// Logging station summit reference.
    pub const MY_SOTA_REF: &str = "MY_SOTA_REF";
    /// QSO date `YYYYMMDD`.
    pub const QSO_DATE: &str = "QSO_DATE";
}

/// One logged exchange, reduced to the fields the enrichment uses.
///
/// Empty strings in the source log are read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Worked station callsign.
    pub callsign: Option<String>,
    /// Band text.
    pub band: Option<String>,
    /// Start time.
    pub time: Option<String>,
    /// Worked station location text.
    pub qth: Option<String>,
    /// Worked station grid locator, unvalidated.
    pub locator: Option<String>,
    /// Worked station summit reference.
    pub sota_ref: Option<String>,
    /// Comment or signal report.
    pub comment: Option<String>,
    /// Logging station callsign.
    pub station_callsign: Option<String>,
    /// Logging station grid locator, unvalidated.
    pub my_locator: Option<String>,
    /// Logging station summit reference.
    pub my_sota_ref: Option<String>,
    /// QSO date `YYYYMMDD`.
    pub qso_date: Option<String>,
}

impl ContactRecord {
    /// Extracts the known fields from a flat ADIF record.
    pub fn from_adif(rec: &AdifRecord) -> Self {
        let get = |name: &str| rec.get_nonempty(name).map(str::to_string);
        Self {
            callsign: get(fields::CALL),
            band: get(fields::BAND),
            time: get(fields::TIME_ON),
            qth: get(fields::QTH),
            locator: get(fields::GRIDSQUARE),
            sota_ref: get(fields::SOTA_REF),
            comment: get(fields::COMMENT),
            station_callsign: get(fields::STATION_CALLSIGN),
            my_locator: get(fields::MY_GRIDSQUARE),
            my_sota_ref: get(fields::MY_SOTA_REF),
            qso_date: get(fields::QSO_DATE),
        }
    }
}

impl From<&AdifRecord> for ContactRecord {
    fn from(value: &AdifRecord) -> Self {
        Self::from_adif(value)
    }
}

/// A contact with its resolved peer position and distance.
///
/// Serializes to the per-QSO layout of the session JSON report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedQso {
    /// Start time, empty when not logged.
    pub time: String,
    /// Worked station callsign.
    pub callsign: Option<String>,
    /// Band text.
    pub band: Option<String>,
    /// Worked station location text, empty when not logged.
    pub qth: String,
    /// Worked station grid locator as logged, empty when not logged.
    pub locator: String,
    /// Resolved peer latitude.
    pub lat: Option<Degrees>,
    /// Resolved peer longitude.
    pub lon: Option<Degrees>,
    /// Distance to the logging station, rounded to whole kilometers.
    pub distance_km: Option<i64>,
    /// Worked station summit reference, empty when not logged.
    pub sota_ref: String,
    /// Comment, empty when not logged.
    pub comment: String,
}
