//! Minimal ADIF (`.adi`) reader producing flat key-value records.

use std::fmt;
use std::path::Path;

use hashbrown::HashMap;

/// One ADIF record. Field names are stored upper-cased.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdifRecord {
    fields: HashMap<String, String>,
}

impl AdifRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` (any case) to `value`, replacing an earlier value.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_ascii_uppercase(), value.into());
    }

    /// Builder form of [`AdifRecord::insert`].
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Field value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name.to_ascii_uppercase().as_str())
            .map(String::as_str)
    }

    /// Field value with surrounding whitespace removed, `None` when blank.
    pub fn get_nonempty(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for AdifRecord {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut rec = Self::new();
        for (k, v) in iter {
            rec.insert(k, v);
        }
        rec
    }
}

/// ADIF read failure.
#[derive(Debug)]
pub enum AdifError {
    /// A `<` was never closed by `>`.
    UnterminatedTag {
        /// Byte offset of the opening `<`.
        offset: usize,
    },
    /// The length part of a field tag is not a number.
    BadLength {
        /// Field name.
        field: String,
        /// Byte offset of the tag.
        offset: usize,
    },
    /// Input ended before the declared number of value characters.
    Truncated {
        /// Field name.
        field: String,
    },
    /// The file could not be read.
    Io(std::io::Error),
}

impl From<std::io::Error> for AdifError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for AdifError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTag { offset } => write!(f, "unterminated tag at byte {offset}"),
            Self::BadLength { field, offset } => {
                write!(f, "bad length for field {field} at byte {offset}")
            }
            Self::Truncated { field } => write!(f, "value of field {field} is truncated"),
            Self::Io(e) => write!(f, "read failed: {e}"),
        }
    }
}

impl std::error::Error for AdifError {}

/// Reads and parses an ADIF file. Invalid UTF-8 is replaced, not rejected.
pub fn read_adif_file(path: impl AsRef<Path>) -> Result<Vec<AdifRecord>, AdifError> {
    let bytes = std::fs::read(path)?;
    parse_adif(&String::from_utf8_lossy(&bytes))
}

/// Parses ADIF text into records, skipping the header.
///
/// Fields after the last `<EOR>` are dropped. Tags without a length (other
/// than `EOH`/`EOR`) are ignored.
pub fn parse_adif(text: &str) -> Result<Vec<AdifRecord>, AdifError> {
    let mut pos = body_start(text);
    let mut records = Vec::new();
    let mut current = AdifRecord::new();

    while let Some(rel) = text[pos..].find('<') {
        let lt = pos + rel;
        let gt = text[lt..]
            .find('>')
            .map(|r| lt + r)
            .ok_or(AdifError::UnterminatedTag { offset: lt })?;

        let mut parts = text[lt + 1..gt].split(':');
        let name = parts.next().unwrap_or_default().trim().to_ascii_uppercase();
        pos = gt + 1;

        match name.as_str() {
            "EOR" => {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
                continue;
            }
            "EOH" => {
                current = AdifRecord::new();
                continue;
            }
            _ => {}
        }

        let Some(len) = parts.next() else {
            continue;
        };
        let len: usize = len.trim().parse().map_err(|_| AdifError::BadLength {
            field: name.clone(),
            offset: lt,
        })?;

        let rest = &text[pos..];
        let end = value_end(rest, len).ok_or_else(|| AdifError::Truncated {
            field: name.clone(),
        })?;
        current.insert(&name, &rest[..end]);
        pos += end;
    }

    Ok(records)
}

// A header exists unless the text opens with a tag.
fn body_start(text: &str) -> usize {
    if text.trim_start().starts_with('<') {
        return 0;
    }
    let lower = text.to_ascii_lowercase();
    match lower.find("<eoh>") {
        Some(i) => i + "<eoh>".len(),
        None => text.find('<').unwrap_or(text.len()),
    }
}

// Byte length of the first `chars` characters of `s`.
fn value_end(s: &str, chars: usize) -> Option<usize> {
    if chars == 0 {
        return Some(0);
    }
    s.char_indices()
        .nth(chars - 1)
        .map(|(i, c)| i + c.len_utf8())
}
