use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    qso::{ContactRecord, EnrichedQso},
    summit::SummitLookup,
    types::{Degrees, Resolved},
};

use super::resolver::resolve;

/// Logging-station state shared by every contact of one log file.
///
/// Built once from the first record and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    /// Logging station callsign.
    pub callsign: Option<String>,
    /// Logging station summit reference.
    pub sota_ref: Option<String>,
    /// Logging station grid locator as logged.
    pub locator: Option<String>,
    /// Session date as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Resolved logging-station position.
    pub location: Option<Resolved>,
}

impl SessionContext {
    /// Reads the observer fields of `first` and resolves its position.
    ///
    /// A malformed own locator leaves the position unknown.
    pub fn from_first_record<L: SummitLookup + ?Sized>(first: &ContactRecord, lookup: &L) -> Self {
        let location = match resolve(
            first.my_sota_ref.as_deref(),
            first.my_locator.as_deref(),
            lookup,
        ) {
            Ok(loc) => loc,
            Err(err) => {
                warn!(
                    locator = first.my_locator.as_deref().unwrap_or_default(),
                    error = %err,
                    "own locator is malformed; distances unavailable for this session"
                );
                None
            }
        };

        Self {
            callsign: first.station_callsign.clone(),
            sota_ref: first.my_sota_ref.clone(),
            locator: first.my_locator.clone(),
            date: first.qso_date.as_deref().map(format_adif_date),
            location,
        }
    }
}

/// Serializable summary of one enriched log file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session date as `YYYY-MM-DD`, empty when not logged.
    pub date: String,
    /// Logging station callsign.
    pub my_callsign: String,
    /// Logging station grid locator.
    pub my_locator: String,
    /// Logging station latitude.
    pub my_lat: Option<Degrees>,
    /// Logging station longitude.
    pub my_lon: Option<Degrees>,
    /// Logging station summit reference.
    pub my_sota: String,
    /// Enriched contacts in log order.
    pub qsos: Vec<EnrichedQso>,
}

impl SessionReport {
    /// Assembles a report from a context and its enriched contacts.
    pub fn new(context: &SessionContext, qsos: Vec<EnrichedQso>) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            date: text(&context.date),
            my_callsign: text(&context.callsign),
            my_locator: text(&context.locator),
            my_lat: context.location.map(|r| r.coord.lat),
            my_lon: context.location.map(|r| r.coord.lon),
            my_sota: text(&context.sota_ref),
            qsos,
        }
    }
}

/// `YYYYMMDD` to `YYYY-MM-DD`; anything else is returned unchanged.
pub fn format_adif_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..])
    } else {
        raw.to_string()
    }
}
