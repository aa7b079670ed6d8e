//! Blocking client for the SOTA summit database API.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SummitApiConfig;

use super::{SummitLocation, SummitLookup};

/// Failure talking to the summit API. Never escapes [`SummitLookup::lookup`].
#[derive(Debug)]
pub enum LookupError {
    /// Client construction or transport failure.
    Http(reqwest::Error),
    /// Non-success HTTP status.
    Status(u16),
    /// Response lacked a usable position.
    MissingPosition,
}

impl From<reqwest::Error> for LookupError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "request failed: {e}"),
            Self::Status(code) => write!(f, "HTTP {code}"),
            Self::MissingPosition => write!(f, "response has no latitude/longitude"),
        }
    }
}

impl std::error::Error for LookupError {}

#[derive(Debug, Deserialize)]
struct SummitResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "altM")]
    alt_m: Option<f64>,
}

/// [`SummitLookup`] backed by `GET {base_url}/{reference}`.
pub struct SotaApiLookup {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl SotaApiLookup {
    /// Builds a client from `config`.
    pub fn new(config: &SummitApiConfig) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for `reference`.
    pub fn url_for(&self, reference: &str) -> String {
        format!("{}/{}", self.base_url, reference.trim())
    }

    /// Fetches one summit, reporting why it failed.
    pub fn fetch(&self, reference: &str) -> Result<SummitLocation, LookupError> {
        let url = self.url_for(reference);
        debug!(%url, "fetching summit");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: SummitResponse = response.json()?;
        match (body.latitude, body.longitude) {
            (Some(lat), Some(lon)) => Ok(SummitLocation {
                lat,
                lon,
                alt_m: body.alt_m,
            }),
            _ => Err(LookupError::MissingPosition),
        }
    }
}

impl SummitLookup for SotaApiLookup {
    fn lookup(&self, reference: &str) -> Option<SummitLocation> {
        match self.fetch(reference) {
            Ok(loc) => Some(loc),
            Err(err) => {
                warn!(reference, error = %err, "summit lookup failed");
                None
            }
        }
    }
}
