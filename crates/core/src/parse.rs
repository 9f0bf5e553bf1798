//! Text-to-identifier parser
//!
//! A small state machine over code points:
//!
//! ```text
//! Initial --hex--> Parsing --32nd digit--> Finished
//!    |                |                       |
//!    +----------------+-------- any illegal --+--> error
//! ```
//!
//! - `Initial` takes leading whitespace and at most one `{`.
//! - `Parsing` fills the 16 bytes high nibble first. `-` and whitespace are
//!   only legal between completed bytes.
//! - `Finished` takes trailing whitespace and the matching `}` if one was
//!   opened.
//!
//! This accepts the hyphenated form, the compact 32-digit form, either of
//! those in braces, and whitespace between byte pairs, in either hex case.
//! Anything else yields no value; a partially filled identifier never escapes.

use core::str::FromStr;

use thiserror::Error;

use crate::params::{UUID_DIGITS, UUID_SIZE};
use crate::primitives::hex_value;
use crate::uuid::Uuid;

/// Why a string is not an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {index}")]
    UnexpectedChar { ch: char, index: usize },

    #[error("separator at position {index} splits a byte")]
    SplitByte { index: usize },

    #[error("digit at position {index} exceeds 32 hex digits")]
    TooManyDigits { index: usize },

    #[error("expected 32 hex digits, found {digits}")]
    TooFewDigits { digits: usize },

    #[error("opening brace is never closed")]
    UnclosedBrace,

    #[error("invalid UTF-16 at code unit {index}")]
    InvalidUtf16 { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Initial,
    Parsing,
    Finished,
}

struct Parser {
    state: State,
    bytes: [u8; UUID_SIZE],
    digits: usize,
    brace_open: bool,
    brace_closed: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::Initial,
            bytes: [0u8; UUID_SIZE],
            digits: 0,
            brace_open: false,
            brace_closed: false,
        }
    }

    fn write_digit(&mut self, value: u8) {
        let byte = &mut self.bytes[self.digits / 2];
        if self.digits % 2 == 0 {
            *byte = value << 4;
        } else {
            *byte |= value;
        }
        self.digits += 1;
        self.state = if self.digits == UUID_DIGITS {
            State::Finished
        } else {
            State::Parsing
        };
    }

    fn step(&mut self, ch: char, index: usize) -> Result<(), ParseError> {
        let unexpected = ParseError::UnexpectedChar { ch, index };

        match self.state {
            State::Initial => {
                if let Some(value) = hex_value(ch) {
                    self.write_digit(value);
                } else if ch == '{' && !self.brace_open {
                    self.brace_open = true;
                } else if !ch.is_whitespace() {
                    return Err(unexpected);
                }
            }
            State::Parsing => {
                if let Some(value) = hex_value(ch) {
                    self.write_digit(value);
                } else if ch == '-' || ch.is_whitespace() {
                    if self.digits % 2 != 0 {
                        return Err(ParseError::SplitByte { index });
                    }
                } else {
                    return Err(unexpected);
                }
            }
            State::Finished => {
                if hex_value(ch).is_some() {
                    return Err(ParseError::TooManyDigits { index });
                } else if ch == '}' && self.brace_open && !self.brace_closed {
                    self.brace_closed = true;
                } else if !ch.is_whitespace() {
                    return Err(unexpected);
                }
            }
        }
        Ok(())
    }

    fn end(self, seen: usize) -> Result<Uuid, ParseError> {
        match self.state {
            State::Finished if self.brace_open != self.brace_closed => {
                Err(ParseError::UnclosedBrace)
            }
            State::Finished => Ok(Uuid::from_bytes(self.bytes)),
            _ if seen == 0 => Err(ParseError::Empty),
            _ => Err(ParseError::TooFewDigits {
                digits: self.digits,
            }),
        }
    }
}

/// Run the parser over a sequence of code points
pub fn parse_chars<I: IntoIterator<Item = char>>(chars: I) -> Result<Uuid, ParseError> {
    run(chars.into_iter().map(Ok))
}

/// Drive the state machine lazily; the first error from the input or a step wins
fn run<I: IntoIterator<Item = Result<char, ParseError>>>(input: I) -> Result<Uuid, ParseError> {
    let mut parser = Parser::new();
    let mut seen = 0;
    for (index, ch) in input.into_iter().enumerate() {
        parser.step(ch?, index)?;
        seen = index + 1;
    }
    parser.end(seen)
}

impl Uuid {
    /// Parse any accepted text form, or `None`
    pub fn parse(text: &str) -> Option<Self> {
        parse_chars(text.chars()).ok()
    }

    /// Parse UTF-16 code units; unpaired surrogates fail the parse
    pub fn parse_utf16(units: &[u16]) -> Option<Self> {
        try_parse_utf16(units).ok()
    }
}

/// UTF-16 entry point with a descriptive error
///
/// Code units are decoded as the parser consumes them, so a malformed
/// identifier is rejected before the rest of the input is looked at.
pub fn try_parse_utf16(units: &[u16]) -> Result<Uuid, ParseError> {
    let mut offset = 0;
    run(
        char::decode_utf16(units.iter().copied()).map(|decoded| match decoded {
            Ok(ch) => {
                offset += ch.len_utf16();
                Ok(ch)
            }
            Err(_) => Err(ParseError::InvalidUtf16 { index: offset }),
        }),
    )
}

impl FromStr for Uuid {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_chars(s.chars())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uuid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UuidVisitor;

        impl serde::de::Visitor<'_> for UuidVisitor {
            type Value = Uuid;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a UUID string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Uuid, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(UuidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse_chars("".chars()), Err(ParseError::Empty));
        assert_eq!(
            parse_chars("  ".chars()),
            Err(ParseError::TooFewDigits { digits: 0 })
        );
        assert_eq!(
            parse_chars("FAEADACA-B-BAA-99887766-554433221100".chars()),
            Err(ParseError::SplitByte { index: 10 })
        );
        assert_eq!(
            parse_chars("FAEADACA-BBAA-9988-7766-554433221100F".chars()),
            Err(ParseError::TooManyDigits { index: 36 })
        );
        assert_eq!(
            parse_chars("{FAEADACA-BBAA-9988-7766-554433221100".chars()),
            Err(ParseError::UnclosedBrace)
        );
        assert_eq!(
            parse_chars("FAEADACA-BBAA-9988-77GG-554433221100".chars()),
            Err(ParseError::UnexpectedChar { ch: 'G', index: 21 })
        );
    }

    #[test]
    fn test_parse_utf16() {
        let text: Vec<u16> = "{faeadaca-bbaa-9988-7766-554433221100}".encode_utf16().collect();
        let id = Uuid::parse_utf16(&text).expect("valid utf-16 uuid");
        assert_eq!(id.time_low(), 0xFAEADACA);

        let mut broken = text.clone();
        broken[3] = 0xD800;
        assert_eq!(
            try_parse_utf16(&broken),
            Err(ParseError::InvalidUtf16 { index: 3 })
        );
    }

    #[test]
    fn test_parse_utf16_stops_at_first_error() {
        // A bad unit after accepted whitespace and digits
        let mut units: Vec<u16> = " \tFA".encode_utf16().collect();
        units.push(0xDC00);
        assert_eq!(
            try_parse_utf16(&units),
            Err(ParseError::InvalidUtf16 { index: 4 })
        );

        // A syntax error ahead of the bad unit is reported first
        let units = [u16::from(b'x'), 0xD800, 0xD800];
        assert_eq!(
            try_parse_utf16(&units),
            Err(ParseError::UnexpectedChar { ch: 'x', index: 0 })
        );

        // So is a digit past the end of a complete identifier
        let mut units: Vec<u16> = "FAEADACABBAA99887766554433221100F".encode_utf16().collect();
        units.push(0xD800);
        assert_eq!(
            try_parse_utf16(&units),
            Err(ParseError::TooManyDigits { index: 32 })
        );

        assert_eq!(try_parse_utf16(&[]), Err(ParseError::Empty));
    }
}
