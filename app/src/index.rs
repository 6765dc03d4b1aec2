//! Index argument parsing

use std::fmt;
use std::num::IntErrorKind;
use thiserror::Error;

/// A parsed index, narrow (`i32`) or wide (`i64`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Index {
    Narrow(i32),
    Wide(i64),
}

impl Index {
    /// Width the index was parsed at
    pub fn bits(self) -> u32 {
        match self {
            Index::Narrow(_) => i32::BITS,
            Index::Wide(_) => i64::BITS,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Narrow(v) => write!(f, "{}", v),
            Index::Wide(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexParseError {
    #[error("missing index argument")]
    Missing,
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
    #[error("{value} does not fit in a {bits}-bit index")]
    OutOfRange { value: String, bits: u32 },
}

/// Parse an index argument.
///
/// Surrounding whitespace and a leading `+` are accepted. Values outside the
/// chosen width are an error rather than being truncated.
pub fn parse_index(raw: Option<&str>, wide: bool) -> Result<Index, IndexParseError> {
    let raw = raw.ok_or(IndexParseError::Missing)?;
    let trimmed = raw.trim();

    let classify = |kind: &IntErrorKind, bits: u32| match kind {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IndexParseError::OutOfRange {
            value: trimmed.to_string(),
            bits,
        },
        _ => IndexParseError::NotAnInteger(raw.to_string()),
    };

    if wide {
        trimmed
            .parse::<i64>()
            .map(Index::Wide)
            .map_err(|e| classify(e.kind(), 64))
    } else {
        trimmed
            .parse::<i32>()
            .map(Index::Narrow)
            .map_err(|e| classify(e.kind(), 32))
    }
}
