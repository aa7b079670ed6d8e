//! Summit reference lookup boundary.
//!
//! A lookup answers with a location or "not found". Implementations that talk
//! to a remote service fold every transport failure into "not found" and log
//! it; callers never see a raw transport error.

/// SOTA summit database client.
pub mod sota;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Degrees, Meters};

/// Position of a summit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummitLocation {
    /// Latitude in degrees.
    pub lat: Degrees,
    /// Longitude in degrees.
    pub lon: Degrees,
    /// Summit height in meters, when the source reports one.
    pub alt_m: Option<Meters>,
}

impl SummitLocation {
    /// Sea-level location without a height.
    pub fn new(lat: Degrees, lon: Degrees) -> Self {
        Self {
            lat,
            lon,
            alt_m: None,
        }
    }

    /// Coordinate of the summit, raised to its height when known.
    pub fn to_coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon).with_altitude(self.alt_m.unwrap_or(0.0))
    }
}

/// Resolves a summit reference such as `G/LD-001` to a location.
pub trait SummitLookup {
    /// Returns the summit location, or `None` when it is unknown or the
    /// source is unavailable.
    fn lookup(&self, reference: &str) -> Option<SummitLocation>;
}

impl<T: SummitLookup + ?Sized> SummitLookup for &T {
    fn lookup(&self, reference: &str) -> Option<SummitLocation> {
        (**self).lookup(reference)
    }
}

impl<T: SummitLookup + ?Sized> SummitLookup for Box<T> {
    fn lookup(&self, reference: &str) -> Option<SummitLocation> {
        (**self).lookup(reference)
    }
}

/// Lookup that never finds anything; for offline runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSummitLookup;

impl SummitLookup for NoSummitLookup {
    fn lookup(&self, _reference: &str) -> Option<SummitLocation> {
        None
    }
}

/// Fixed in-memory table of summits. References match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct StaticSummitTable {
    summits: HashMap<String, SummitLocation>,
}

impl StaticSummitTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a summit.
    pub fn insert(&mut self, reference: &str, location: SummitLocation) {
        self.summits.insert(normalize_ref(reference), location);
    }

    /// Builder form of [`StaticSummitTable::insert`].
    pub fn with(mut self, reference: &str, location: SummitLocation) -> Self {
        self.insert(reference, location);
        self
    }

    /// Number of summits.
    pub fn len(&self) -> usize {
        self.summits.len()
    }

    /// True when the table holds no summits.
    pub fn is_empty(&self) -> bool {
        self.summits.is_empty()
    }
}

impl SummitLookup for StaticSummitTable {
    fn lookup(&self, reference: &str) -> Option<SummitLocation> {
        self.summits.get(&normalize_ref(reference)).copied()
    }
}

fn normalize_ref(reference: &str) -> String {
    reference.trim().to_ascii_uppercase()
}
