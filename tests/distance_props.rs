use std::f64::consts::PI;

use proptest::prelude::*;

use qsogeo::{
    core::distance::{
        DistanceCalculator, DistanceMethod, EQUATORIAL_RADIUS_M, EllipsoidalArc, Haversine,
        MEAN_EARTH_RADIUS_KM, distance_between, round_km,
    },
    types::Coordinate,
};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

#[test]
fn haversine_of_a_point_with_itself_is_zero() {
    let p = Coordinate::new(47.3, 8.5);
    assert_eq!(Haversine.distance_km(&p, &p), 0.0);
}

#[test]
fn haversine_quarter_of_the_equator() {
    let d = Haversine.distance_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 90.0));
    assert!((d - MEAN_EARTH_RADIUS_KM * PI / 2.0).abs() < 1e-6);
}

#[test]
fn haversine_ignores_altitude() {
    let a = Coordinate::new(46.0, 7.0);
    let b = Coordinate::new(46.5, 7.5);
    assert_eq!(
        Haversine.distance_km(&a, &b),
        Haversine.distance_km(&a.with_altitude(4000.0), &b.with_altitude(3000.0))
    );
}

#[test]
fn local_radius_at_the_equator_is_the_equatorial_radius() {
    assert_eq!(EllipsoidalArc::radius_at(0.0), EQUATORIAL_RADIUS_M);
}

#[test]
fn ellipsoidal_same_latitude_sea_level_is_radius_times_angle() {
    let lat: f64 = 47.0;
    let a = Coordinate::new(lat, 8.0);
    let b = Coordinate::new(lat, 11.5);

    let phi = lat.to_radians();
    let d_lon = (11.5f64 - 8.0).to_radians();
    let angle = (phi.sin().powi(2) + phi.cos().powi(2) * d_lon.cos()).acos();
    let expected = EllipsoidalArc::radius_at(lat) * angle / 1000.0;

    let d = EllipsoidalArc.distance_km(&a, &b);
    assert!((d - expected).abs() < 1e-9, "{d} vs {expected}");
}

#[test]
fn ellipsoidal_altitude_scales_the_arc() {
    let a = Coordinate::new(0.0, 10.0);
    let b = Coordinate::new(0.0, 12.0);
    let ground = EllipsoidalArc.distance_km(&a, &b);
    let raised = EllipsoidalArc.distance_km(&a.with_altitude(2000.0), &b.with_altitude(2000.0));

    let expected = ground * (EQUATORIAL_RADIUS_M + 2000.0) / EQUATORIAL_RADIUS_M;
    assert!((raised - expected).abs() < 1e-9);
    assert!(raised > ground);
}

#[test]
fn ellipsoidal_identical_points_are_near_zero_not_nan() {
    let p = Coordinate::new(46.5580, 7.8350).with_altitude(4158.0);
    let d = EllipsoidalArc.distance_km(&p, &p);
    assert!(!d.is_nan());
    // Law of cosines loses precision for tiny angles; well under a meter.
    assert!(d < 1e-3, "{d}");
}

#[test]
fn named_methods_dispatch_to_their_strategy() {
    let a = Coordinate::new(51.5, -0.1);
    let b = Coordinate::new(48.9, 2.35).with_altitude(100.0);
    assert_eq!(
        DistanceMethod::Haversine.distance_km(&a, &b),
        Haversine.distance_km(&a, &b)
    );
    assert_eq!(
        DistanceMethod::Ellipsoidal.distance_km(&a, &b),
        EllipsoidalArc.distance_km(&a, &b)
    );
    assert_eq!(DistanceMethod::default(), DistanceMethod::Haversine);
}

#[test]
fn unknown_endpoint_gives_unknown_distance() {
    let p = Coordinate::new(10.0, 10.0);
    assert_eq!(distance_between(&Haversine, Some(&p), None), None);
    assert_eq!(distance_between(&Haversine, None, Some(&p)), None);
    assert_eq!(distance_between(&EllipsoidalArc, None, None), None);
    assert_eq!(distance_between(&Haversine, Some(&p), Some(&p)), Some(0.0));
}

#[test]
fn whole_kilometers_round_halves_to_even() {
    assert_eq!(round_km(0.5), 0);
    assert_eq!(round_km(1.5), 2);
    assert_eq!(round_km(2.5), 2);
    assert_eq!(round_km(2.5001), 3);
    assert_eq!(round_km(1234.49), 1234);
    assert_eq!(round_km(0.0), 0);
}

proptest! {
    #[test]
    fn haversine_is_symmetric(a in coordinate(), b in coordinate()) {
        let ab = Haversine.distance_km(&a, &b);
        let ba = Haversine.distance_km(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
        prop_assert!(ab >= 0.0 && ab <= MEAN_EARTH_RADIUS_KM * PI + 1e-6);
    }

    #[test]
    fn haversine_self_distance_is_zero(a in coordinate()) {
        prop_assert_eq!(Haversine.distance_km(&a, &a), 0.0);
    }

    #[test]
    fn ellipsoidal_never_produces_nan(a in coordinate(), b in coordinate()) {
        prop_assert!(!EllipsoidalArc.distance_km(&a, &b).is_nan());
    }
}
