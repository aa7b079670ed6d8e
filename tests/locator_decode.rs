use proptest::prelude::*;

use qsogeo::core::locator::{GridLocator, InvalidLocator, decode};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn field_jj_is_the_origin() {
    let c = decode("JJ").unwrap();
    assert_eq!((c.lat, c.lon), (0.0, 0.0));
    assert_eq!(c.alt_m, 0.0);
}

#[test]
fn zero_square_does_not_move_the_field_corner() {
    assert_eq!(decode("JJ00").unwrap(), decode("JJ").unwrap());
    assert_eq!(decode("JJ00AA00").unwrap(), decode("JJ").unwrap());
}

#[test]
fn decoding_ignores_case_and_surrounding_whitespace() {
    assert_eq!(decode(" fn31pr ").unwrap(), decode("FN31PR").unwrap());
}

#[test]
fn square_anchors_to_lower_left_corner() {
    let c = decode("FN31").unwrap();
    assert_close(c.lat, 41.0);
    assert_close(c.lon, -74.0);
}

#[test]
fn subsquare_adds_minutes() {
    let c = decode("AB12CD").unwrap();
    assert_close(c.lon, -180.0 + 2.0 + 2.0 * 5.0 / 60.0);
    assert_close(c.lat, -80.0 + 2.0 + 3.0 * 2.5 / 60.0);
}

#[test]
fn extended_square_adds_tenths_of_subsquare() {
    let base = decode("IO91WM").unwrap();
    let ext = decode("IO91WM47").unwrap();
    assert_close(ext.lon - base.lon, 4.0 * 5.0 / 600.0);
    assert_close(ext.lat - base.lat, 7.0 * 2.5 / 600.0);
}

#[test]
fn bad_lengths_are_rejected() {
    assert_eq!(decode("A"), Err(InvalidLocator::Length(1)));
    assert_eq!(decode("ABCDE"), Err(InvalidLocator::Length(5)));
    assert_eq!(decode(""), Err(InvalidLocator::Length(0)));
    assert_eq!(decode("JJ00AA00BB"), Err(InvalidLocator::Length(10)));
}

#[test]
fn wrong_character_classes_are_rejected() {
    assert_eq!(
        decode("JJAA"),
        Err(InvalidLocator::NotADigit { pos: 2, found: 'A' })
    );
    assert_eq!(
        decode("1J"),
        Err(InvalidLocator::NotALetter { pos: 0, found: '1' })
    );
    assert_eq!(
        decode("JJ00A1"),
        Err(InvalidLocator::NotALetter { pos: 5, found: '1' })
    );
    assert_eq!(decode("JÅ"), Err(InvalidLocator::NotAscii));
}

#[test]
fn field_letters_past_r_are_accepted() {
    // Only A-Z is checked; the 18-letter field range is not.
    assert!(decode("ZZ").is_ok());
}

#[test]
fn grid_locator_keeps_normalized_text() {
    let g: GridLocator = "io91wm".parse().unwrap();
    assert_eq!(g.as_str(), "IO91WM");
    assert_eq!(g.precision(), 6);
    assert_eq!(g.to_string(), "IO91WM");
}

fn valid_locator() -> impl Strategy<Value = String> {
    let field = proptest::char::range('A', 'R');
    let digit = proptest::char::range('0', '9');
    let sub = proptest::char::range('a', 'x');
    (
        field.clone(),
        field,
        digit.clone(),
        digit.clone(),
        sub.clone(),
        sub,
        digit.clone(),
        digit,
        prop::sample::select(vec![2usize, 4, 6, 8]),
    )
        .prop_map(|(a, b, c, d, e, f, g, h, len)| {
            [a, b, c, d, e, f, g, h].iter().take(len).collect()
        })
}

proptest! {
    #[test]
    fn valid_locators_decode_inside_world_bounds(loc in valid_locator()) {
        let c = decode(&loc).unwrap();
        prop_assert!((-90.0..=90.0).contains(&c.lat), "lat {} for {}", c.lat, loc);
        prop_assert!((-180.0..=180.0).contains(&c.lon), "lon {} for {}", c.lon, loc);
    }

    #[test]
    fn finer_tiers_stay_inside_the_coarser_cell(loc in valid_locator()) {
        let c = decode(&loc).unwrap();
        let field = decode(&loc[..2]).unwrap();
        prop_assert!(c.lat >= field.lat && c.lat < field.lat + 10.0);
        prop_assert!(c.lon >= field.lon && c.lon < field.lon + 20.0);
    }

    #[test]
    fn odd_or_oversized_lengths_fail(s in "[A-Z0-9]{0,12}") {
        let len = s.len();
        prop_assume!(len % 2 == 1 || len > 8 || len == 0);
        prop_assert_eq!(decode(&s), Err(InvalidLocator::Length(len)));
    }
}
