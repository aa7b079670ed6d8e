//! Maidenhead grid locator decoding.
//!
//! Each precision tier narrows the cell and the decoded point is always the
//! lower-left (south-west) corner of the finest cell present. Points are not
//! centered, so existing reports keep their exact coordinates.

use std::fmt;
use std::str::FromStr;

use crate::types::Coordinate;

/// Shortest accepted locator (field only).
pub const MIN_LEN: usize = 2;
/// Longest accepted locator (extended square).
pub const MAX_LEN: usize = 8;

/// Malformed grid locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidLocator {
    /// Length is odd or outside [`MIN_LEN`, `MAX_LEN`].
    Length(usize),
    /// Locator contains non-ASCII characters.
    NotAscii,
    /// A letter position held something other than A-Z.
    NotALetter {
        /// Zero-based position.
        pos: usize,
        /// Offending character.
        found: char,
    },
    /// A digit position held something other than 0-9.
    NotADigit {
        /// Zero-based position.
        pos: usize,
        /// Offending character.
        found: char,
    },
}

impl fmt::Display for InvalidLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(n) => write!(
                f,
                "locator requires {MIN_LEN}-{MAX_LEN} characters, even number of characters (got {n})"
            ),
            Self::NotAscii => write!(f, "locator contains non-ASCII characters"),
            Self::NotALetter { pos, found } => {
                write!(f, "expected letter at position {pos}, found {found:?}")
            }
            Self::NotADigit { pos, found } => {
                write!(f, "expected digit at position {pos}, found {found:?}")
            }
        }
    }
}

impl std::error::Error for InvalidLocator {}

/// Validated, upper-cased grid locator of 2, 4, 6 or 8 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GridLocator(String);

impl GridLocator {
    /// Validates `raw` (surrounding whitespace ignored, any case).
    pub fn parse(raw: &str) -> Result<Self, InvalidLocator> {
        let norm = raw.trim().to_ascii_uppercase();
        if !norm.is_ascii() {
            return Err(InvalidLocator::NotAscii);
        }

        let len = norm.len();
        if !(MIN_LEN..=MAX_LEN).contains(&len) || len % 2 != 0 {
            return Err(InvalidLocator::Length(len));
        }

        for (pos, b) in norm.bytes().enumerate() {
            let found = char::from(b);
            if is_digit_position(pos) {
                if !b.is_ascii_digit() {
                    return Err(InvalidLocator::NotADigit { pos, found });
                }
            } else if !b.is_ascii_uppercase() {
                return Err(InvalidLocator::NotALetter { pos, found });
            }
        }

        Ok(Self(norm))
    }

    /// Upper-cased locator text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (2, 4, 6 or 8).
    pub fn precision(&self) -> usize {
        self.0.len()
    }

    /// Lower-left corner of the finest cell named by this locator.
    pub fn to_coordinate(&self) -> Coordinate {
        let c = self.0.as_bytes();
        let letter = |i: usize| f64::from(c[i] - b'A');
        let digit = |i: usize| f64::from(c[i] - b'0');

        let mut lon = -180.0 + letter(0) * 20.0;
        let mut lat = -90.0 + letter(1) * 10.0;

        if c.len() >= 4 {
            lon += digit(2) * 2.0;
            lat += digit(3);
        }
        if c.len() >= 6 {
            lon += letter(4) * 5.0 / 60.0;
            lat += letter(5) * 2.5 / 60.0;
        }
        if c.len() >= 8 {
            lon += digit(6) * 5.0 / 600.0;
            lat += digit(7) * 2.5 / 600.0;
        }

        Coordinate::new(lat, lon)
    }
}

impl FromStr for GridLocator {
    type Err = InvalidLocator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GridLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decodes `locator` into the lower-left corner of its cell.
pub fn decode(locator: &str) -> Result<Coordinate, InvalidLocator> {
    GridLocator::parse(locator).map(|g| g.to_coordinate())
}

// Pairs 0-1 and 4-5 are letters, pairs 2-3 and 6-7 are digits.
fn is_digit_position(pos: usize) -> bool {
    matches!(pos, 2 | 3 | 6 | 7)
}
