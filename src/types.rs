//! Shared primitive types: coordinates and their provenance.

use serde::{Deserialize, Serialize};

/// Latitude or longitude in decimal degrees.
pub type Degrees = f64;
/// Height above the reference surface in meters.
pub type Meters = f64;
/// Distance in kilometers.
pub type Kilometers = f64;

/// A point on the Earth's surface, optionally raised by an altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, within [-90, 90].
    pub lat: Degrees,
    /// Longitude in degrees, within [-180, 180].
    pub lon: Degrees,
    /// Altitude in meters; 0 when unknown.
    #[serde(default)]
    pub alt_m: Meters,
}

impl Coordinate {
    /// Creates a sea-level coordinate.
    pub fn new(lat: Degrees, lon: Degrees) -> Self {
        Self { lat, lon, alt_m: 0.0 }
    }

    /// Returns a copy of this coordinate raised to `alt_m` meters.
    pub fn with_altitude(self, alt_m: Meters) -> Self {
        Self { alt_m, ..self }
    }
}

/// Where a resolved coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateSource {
    /// Looked up from a summit reference.
    Summit,
    /// Decoded from a grid locator.
    Locator,
}

/// A coordinate together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    /// Resolved point.
    pub coord: Coordinate,
    /// Source the point was resolved from.
    pub source: CoordinateSource,
}
