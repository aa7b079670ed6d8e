use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    config::EnrichConfig,
    core::distance::{DistanceCalculator, DistanceMethod, round_km},
    qso::{ContactRecord, EnrichedQso},
    summit::SummitLookup,
    types::{CoordinateSource, Resolved},
};

use super::{
    resolver::resolve,
    session::{SessionContext, SessionReport},
};

/// Session-level enrichment failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichError {
    /// The log held no records.
    NoRecords,
}

impl fmt::Display for EnrichError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRecords => write!(f, "log contains no records"),
        }
    }
}

impl std::error::Error for EnrichError {}

/// Attaches peer positions and distances to the contacts of a log.
pub struct Enricher<L: SummitLookup> {
    lookup: L,
    config: EnrichConfig,
}

impl<L: SummitLookup> Enricher<L> {
    /// Creates an enricher resolving summits through `lookup`.
    pub fn new(lookup: L, config: EnrichConfig) -> Self {
        Self { lookup, config }
    }

    /// The summit lookup in use.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Starts a session over `records`, resolving the logging station once.
    ///
    /// Contacts are enriched lazily by [`EnrichedSession::qsos`].
    pub fn enrich<'a>(
        &'a self,
        records: &'a [ContactRecord],
    ) -> Result<EnrichedSession<'a, L>, EnrichError> {
        let first = records.first().ok_or(EnrichError::NoRecords)?;
        let context = SessionContext::from_first_record(first, &self.lookup);
        debug!(
            callsign = context.callsign.as_deref().unwrap_or_default(),
            located = context.location.is_some(),
            "session context built"
        );

        Ok(EnrichedSession {
            enricher: self,
            records,
            context,
        })
    }

    /// Enriches every record and collects the session report.
    pub fn enrich_report(&self, records: &[ContactRecord]) -> Result<SessionReport, EnrichError> {
        let session = self.enrich(records)?;
        let report = session.report();
        info!(
            qsos = report.qsos.len(),
            with_distance = report.qsos.iter().filter(|q| q.distance_km.is_some()).count(),
            "session enriched"
        );
        Ok(report)
    }

    fn method_for(&self, own: &Resolved, peer: &Resolved) -> DistanceMethod {
        match (self.config.s2s_method, own.source, peer.source) {
            (Some(method), CoordinateSource::Summit, CoordinateSource::Summit) => method,
            _ => DistanceMethod::Haversine,
        }
    }
}

/// A log session with its logging-station context resolved.
///
/// Iterating [`EnrichedSession::qsos`] again yields the same contacts; the
/// only state kept between passes is the context.
pub struct EnrichedSession<'a, L: SummitLookup> {
    enricher: &'a Enricher<L>,
    records: &'a [ContactRecord],
    context: SessionContext,
}

impl<'a, L: SummitLookup> EnrichedSession<'a, L> {
    /// Logging-station context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Number of contacts in the session.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the session has no contacts. Never true for a session
    /// returned by [`Enricher::enrich`].
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lazily enriched contacts, in log order.
    pub fn qsos(&self) -> impl Iterator<Item = EnrichedQso> + '_ {
        self.records.iter().map(|rec| self.enrich_one(rec))
    }

    /// Collects all contacts into a report.
    pub fn report(&self) -> SessionReport {
        SessionReport::new(&self.context, self.qsos().collect())
    }

    /// Resolves one contact and measures it against the logging station.
    pub fn enrich_one(&self, rec: &ContactRecord) -> EnrichedQso {
        let peer = match resolve(
            rec.sota_ref.as_deref(),
            rec.locator.as_deref(),
            &self.enricher.lookup,
        ) {
            Ok(peer) => peer,
            Err(err) => {
                warn!(
                    call = rec.callsign.as_deref().unwrap_or_default(),
                    locator = rec.locator.as_deref().unwrap_or_default(),
                    error = %err,
                    "skipping malformed locator"
                );
                None
            }
        };

        let distance_km = match (self.context.location.as_ref(), peer.as_ref()) {
            (Some(own), Some(peer)) => {
                let method = self.enricher.method_for(own, peer);
                Some(round_km(method.distance_km(&own.coord, &peer.coord)))
            }
            _ => None,
        };

        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        EnrichedQso {
            time: text(&rec.time),
            callsign: rec.callsign.clone(),
            band: rec.band.clone(),
            qth: text(&rec.qth),
            locator: text(&rec.locator),
            lat: peer.map(|p| p.coord.lat),
            lon: peer.map(|p| p.coord.lon),
            distance_km,
            sota_ref: text(&rec.sota_ref),
            comment: text(&rec.comment),
        }
    }
}
