//!
//! Character set selection for string attributes
//!
use std::{borrow::Cow, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte encoding used for string attribute values.
///
/// The encoding is declared by the `attributes-charset` operation attribute
/// and applies to the bytes of every subsequent string attribute. Length
/// prefixes always count encoded bytes, not characters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum Charset {
    /// The mandatory baseline of RFC 8011 section 4.1.7
    #[default]
    UsAscii,
    Utf8,
}

/// Charset name which is neither `us-ascii` nor `utf-8`
#[derive(Debug, thiserror::Error)]
#[error("unsupported charset: {0}")]
pub struct UnsupportedCharset(String);

impl Charset {
    /// Charset name as sent in the `attributes-charset` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::UsAscii => "us-ascii",
            Charset::Utf8 => "utf-8",
        }
    }

    /// Encode a string into the bytes of this charset. Characters outside the
    /// charset are substituted with `?` so the length prefix written for the
    /// result always matches the bytes actually emitted.
    pub fn encode<'a>(&self, value: &'a str) -> Cow<'a, [u8]> {
        match self {
            Charset::UsAscii if !value.is_ascii() => Cow::Owned(
                value
                    .chars()
                    .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                    .collect(),
            ),
            _ => Cow::Borrowed(value.as_bytes()),
        }
    }

    /// Decode attribute bytes into text
    pub fn decode(&self, data: &[u8]) -> String {
        match self {
            Charset::UsAscii => data
                .iter()
                .map(|&b| {
                    if b.is_ascii() {
                        b as char
                    } else {
                        char::REPLACEMENT_CHARACTER
                    }
                })
                .collect(),
            Charset::Utf8 => String::from_utf8_lossy(data).into_owned(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Charset {
    type Err = UnsupportedCharset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("us-ascii") {
            Ok(Charset::UsAscii)
        } else if s.eq_ignore_ascii_case("utf-8") {
            Ok(Charset::Utf8)
        } else {
            Err(UnsupportedCharset(s.to_owned()))
        }
    }
}
