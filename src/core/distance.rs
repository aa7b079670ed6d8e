//! Great-circle distance strategies.

use serde::{Deserialize, Serialize};

use crate::types::{Coordinate, Degrees, Kilometers, Meters};

/// Mean Earth radius used by [`Haversine`].
pub const MEAN_EARTH_RADIUS_KM: Kilometers = 6371.0;
/// Equatorial radius used by [`EllipsoidalArc`].
pub const EQUATORIAL_RADIUS_M: Meters = 6_378_137.0;
/// Polar radius used by [`EllipsoidalArc`].
pub const POLAR_RADIUS_M: Meters = 6_356_752.3;

/// Distance between two coordinates, in kilometers.
pub trait DistanceCalculator {
    /// Returns the distance from `a` to `b` in kilometers.
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> Kilometers;
}

/// Spherical haversine distance on a 6371 km sphere. Altitude is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine;

impl DistanceCalculator for Haversine {
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> Kilometers {
        let d_lat = (b.lat - a.lat).to_radians();
        let d_lon = (b.lon - a.lon).to_radians();
        let h = ((d_lat / 2.0).sin().powi(2)
            + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        MEAN_EARTH_RADIUS_KM * c
    }
}

/// Arc length between two raised points using latitude-dependent radii.
///
/// Each endpoint gets the ellipsoid's local radius at its latitude plus its
/// altitude; the mean of the two radii scales a central angle taken from the
/// spherical law of cosines. This mixes an ellipsoidal radius with a
/// spherical angle, so it is an approximation and not a true geodesic. The
/// numbers are relied on by summit-to-summit reports and must stay as they
/// are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EllipsoidalArc;

impl EllipsoidalArc {
    /// Local Earth radius in meters at `lat` degrees.
    pub fn radius_at(lat: Degrees) -> Meters {
        let (a, b) = (EQUATORIAL_RADIUS_M, POLAR_RADIUS_M);
        let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
        let num = a.powi(2) * cos_lat.powi(2) + b.powi(2) * sin_lat.powi(2);
        let den = cos_lat.powi(2) + (b / a).powi(2) * sin_lat.powi(2);
        (num / den).sqrt()
    }

    /// Central angle in radians between `a` and `b`.
    pub fn central_angle(a: &Coordinate, b: &Coordinate) -> f64 {
        let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
        let d_lon = (b.lon - a.lon).to_radians();
        let cos_angle = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * d_lon.cos();
        // Rounding can push identical points just past 1.0.
        cos_angle.clamp(-1.0, 1.0).acos()
    }
}

impl DistanceCalculator for EllipsoidalArc {
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> Kilometers {
        let r1 = Self::radius_at(a.lat) + a.alt_m;
        let r2 = Self::radius_at(b.lat) + b.alt_m;
        let arc_m = ((r1 + r2) / 2.0) * Self::central_angle(a, b);
        arc_m / 1000.0
    }
}

/// Named distance strategy, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMethod {
    /// [`Haversine`].
    #[default]
    Haversine,
    /// [`EllipsoidalArc`].
    Ellipsoidal,
}

impl DistanceCalculator for DistanceMethod {
    fn distance_km(&self, a: &Coordinate, b: &Coordinate) -> Kilometers {
        match self {
            Self::Haversine => Haversine.distance_km(a, b),
            Self::Ellipsoidal => EllipsoidalArc.distance_km(a, b),
        }
    }
}

/// Whole kilometers, with exact halves going to the even neighbor.
pub fn round_km(km: Kilometers) -> i64 {
    km.round_ties_even() as i64
}

/// Distance when both ends are known, `None` otherwise.
pub fn distance_between<D: DistanceCalculator + ?Sized>(
    calc: &D,
    a: Option<&Coordinate>,
    b: Option<&Coordinate>,
) -> Option<Kilometers> {
    match (a, b) {
        (Some(a), Some(b)) => Some(calc.distance_km(a, b)),
        _ => None,
    }
}
