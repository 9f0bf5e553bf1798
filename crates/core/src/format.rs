//! Canonical text rendering
//!
//! Always 36 characters, `8-4-4-4-12` hex groups joined by hyphens, no
//! braces. The whole identifier is written into a fixed buffer in one pass
//! before being handed to the formatter, so width and alignment apply to it
//! as a unit.

use core::fmt;

use crate::params::{UUID_SIZE, UUID_TEXT_LEN};
use crate::primitives::{HEX_LOWER, HEX_UPPER, byte_to_hex};
use crate::uuid::Uuid;

/// Hex digit case used when rendering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Case {
    #[default]
    Upper,
    Lower,
}

impl Case {
    const fn digits(self) -> &'static [u8; 16] {
        match self {
            Case::Upper => HEX_UPPER,
            Case::Lower => HEX_LOWER,
        }
    }
}

/// Byte indices after which a hyphen follows
const GROUP_ENDS: [usize; 4] = [3, 5, 7, 9];

/// Render `id` into its 36-byte ASCII form
pub const fn encode(id: &Uuid, case: Case) -> [u8; UUID_TEXT_LEN] {
    let digits = case.digits();
    let bytes = id.as_bytes();
    let mut out = [b'-'; UUID_TEXT_LEN];
    let mut pos = 0;
    let mut i = 0;
    while i < UUID_SIZE {
        let [hi, lo] = byte_to_hex(bytes[i], digits);
        out[pos] = hi;
        out[pos + 1] = lo;
        pos += 2;
        if i == GROUP_ENDS[0] || i == GROUP_ENDS[1] || i == GROUP_ENDS[2] || i == GROUP_ENDS[3] {
            // already a hyphen
            pos += 1;
        }
        i += 1;
    }
    out
}

impl Uuid {
    /// Canonical text in the requested case
    pub fn to_text(&self, case: Case) -> String {
        let buf = encode(self, case);
        buf.iter().map(|&b| b as char).collect()
    }

    fn write_text(&self, f: &mut fmt::Formatter<'_>, case: Case) -> fmt::Result {
        let buf = encode(self, case);
        match core::str::from_utf8(&buf) {
            Ok(text) => f.pad(text),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// Uppercase canonical form, e.g. `4BE0643F-1D98-573B-97CD-CA98A65347DD`
impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, Case::Upper)
    }
}

impl fmt::UpperHex for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, Case::Upper)
    }
}

impl fmt::LowerHex for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, Case::Lower)
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({})", self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uuid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let id = Uuid::from_fields(0x00112233, 0x4455, 0x6677, 0x88, 0x99, 0xAABBCCDDEEFF);
        assert_eq!(&encode(&id, Case::Upper), b"00112233-4455-6677-8899-AABBCCDDEEFF");
        assert_eq!(&encode(&id, Case::Lower), b"00112233-4455-6677-8899-aabbccddeeff");
    }

    #[test]
    fn test_display_pads_whole_identifier() {
        let id = Uuid::nil();
        let padded = format!("[{:>38}]", id);
        assert_eq!(padded, "[  00000000-0000-0000-0000-000000000000]");
        assert_eq!(format!("{:x}", Uuid::from_u128(u128::MAX)).len(), UUID_TEXT_LEN);
    }
}
