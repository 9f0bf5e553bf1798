//! RFC 4122 identifier layout
//!
//! A [`Uuid`] is 16 bytes in RFC 4122 field order, independent of the host:
//!
//! ```text
//! bytes  0-3   time_low
//! bytes  4-5   time_mid
//! bytes  6-7   time_high_and_version   (version in the top nibble of byte 6)
//! byte   8     clock_seq_hi_and_reserved (variant in the top 1-3 bits)
//! byte   9     clock_seq_low
//! bytes 10-15  node
//! ```
//!
//! Variant and version are always derived from the bytes, never stored.
//! Ordering is lexicographic over the bytes, which is the same as comparing
//! the big-endian `u128` view.

use core::hash::{Hash, Hasher};

use crate::params::{UUID_SIZE, VARIANT_BYTE, VERSION_BYTE};
use crate::primitives::{
    HashCombiner, put, take, u16_from_wire, u16_to_wire, u32_from_wire, u32_to_wire,
    u64_from_wire, u64_to_wire, u128_from_wire, u128_to_wire, usize_from_wire,
};

/// Layout family encoded in the top bits of byte 8
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// All variant bits clear
    None,
    /// `10x`: RFC 4122
    Standard,
    /// `0xx`: NCS backward compatibility
    ReservedNcs,
    /// `110`: Microsoft backward compatibility
    ReservedMicrosoft,
    /// `111`: reserved for future definition
    ReservedFuture,
}

/// Generation algorithm encoded in the top nibble of byte 6
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    None,
    /// 1: time-based
    Time,
    /// 2: DCE security
    Dce,
    /// 3: name-based, MD5
    NameMd5,
    /// 4: random
    Random,
    /// 5: name-based, SHA-1
    NameSha1,
    /// Anything above 5
    Unknown,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::None => "none",
            Variant::Standard => "standard",
            Variant::ReservedNcs => "reserved-ncs",
            Variant::ReservedMicrosoft => "reserved-microsoft",
            Variant::ReservedFuture => "reserved-future",
        }
    }
}

impl Version {
    pub fn name(self) -> &'static str {
        match self {
            Version::None => "none",
            Version::Time => "time",
            Version::Dce => "dce",
            Version::NameMd5 => "name-md5",
            Version::Random => "random",
            Version::NameSha1 => "name-sha1",
            Version::Unknown => "unknown",
        }
    }
}

/// 128-bit universally unique identifier
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Uuid([u8; UUID_SIZE]);

impl Uuid {
    /// The all-zero identifier
    pub const fn nil() -> Self {
        Self([0u8; UUID_SIZE])
    }

    pub const fn from_bytes(bytes: [u8; UUID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Build from the six RFC 4122 fields. Only the low 48 bits of `node` are used.
    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_high_and_version: u16,
        clock_seq_hi_and_reserved: u8,
        clock_seq_low: u8,
        node: u64,
    ) -> Self {
        let mut bytes = [0u8; UUID_SIZE];
        put(&mut bytes, 0, u32_to_wire(time_low));
        put(&mut bytes, 4, u16_to_wire(time_mid));
        put(&mut bytes, 6, u16_to_wire(time_high_and_version));
        bytes[8] = clock_seq_hi_and_reserved;
        bytes[9] = clock_seq_low;
        let node = u64_to_wire(node);
        put(&mut bytes, 10, take::<6>(&node, 2));
        Self(bytes)
    }

    /// Build from five fields, with the clock sequence as one 16-bit value
    pub const fn from_fields_with_clock_seq(
        time_low: u32,
        time_mid: u16,
        time_high_and_version: u16,
        clock_seq: u16,
        node: u64,
    ) -> Self {
        let [hi, lo] = u16_to_wire(clock_seq);
        Self::from_fields(time_low, time_mid, time_high_and_version, hi, lo, node)
    }

    /// Treat `value` as the big-endian image of the 16 bytes
    pub const fn from_u128(value: u128) -> Self {
        Self(u128_to_wire(value))
    }

    pub const fn as_u128(&self) -> u128 {
        u128_from_wire(self.0)
    }

    pub const fn as_bytes(&self) -> &[u8; UUID_SIZE] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; UUID_SIZE] {
        self.0
    }

    pub const fn is_nil(&self) -> bool {
        self.as_u128() == 0
    }

    pub const fn variant(&self) -> Variant {
        match self.0[VARIANT_BYTE] >> 5 {
            0b000 => Variant::None,
            0b001..=0b011 => Variant::ReservedNcs,
            0b100 | 0b101 => Variant::Standard,
            0b110 => Variant::ReservedMicrosoft,
            _ => Variant::ReservedFuture,
        }
    }

    pub const fn version(&self) -> Version {
        match self.0[VERSION_BYTE] >> 4 {
            0 => Version::None,
            1 => Version::Time,
            2 => Version::Dce,
            3 => Version::NameMd5,
            4 => Version::Random,
            5 => Version::NameSha1,
            _ => Version::Unknown,
        }
    }

    pub const fn time_low(&self) -> u32 {
        u32_from_wire(take::<4>(&self.0, 0))
    }

    pub const fn time_mid(&self) -> u16 {
        u16_from_wire(take::<2>(&self.0, 4))
    }

    pub const fn time_high_and_version(&self) -> u16 {
        u16_from_wire(take::<2>(&self.0, 6))
    }

    pub const fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.0[8]
    }

    pub const fn clock_seq_low(&self) -> u8 {
        self.0[9]
    }

    pub const fn clock_seq(&self) -> u16 {
        u16_from_wire(take::<2>(&self.0, 8))
    }

    /// The 48-bit node field
    pub const fn node(&self) -> u64 {
        u64_from_wire(take::<8>(&self.0, 8)) & 0x0000_FFFF_FFFF_FFFF
    }

    /// Fold the identifier into one machine word for hash-table placement
    pub const fn structural_hash(&self) -> usize {
        const WORD: usize = core::mem::size_of::<usize>();

        let mut combiner = HashCombiner::new(usize_from_wire(take::<WORD>(&self.0, 0)));
        let mut at = WORD;
        while at < UUID_SIZE {
            combiner.combine(usize_from_wire(take::<WORD>(&self.0, at)));
            at += WORD;
        }
        combiner.value()
    }

    /// Overwrite the version nibble and variant bits
    pub(crate) const fn stamp(mut self, version_bits: u8, variant_bits: u8) -> Self {
        self.0[VERSION_BYTE] = (self.0[VERSION_BYTE] & 0b0000_1111) | version_bits;
        self.0[VARIANT_BYTE] = (self.0[VARIANT_BYTE] & 0b0011_1111) | variant_bits;
        self
    }
}

impl Hash for Uuid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.structural_hash());
    }
}

impl From<[u8; UUID_SIZE]> for Uuid {
    fn from(bytes: [u8; UUID_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Uuid> for [u8; UUID_SIZE] {
    fn from(id: Uuid) -> Self {
        id.0
    }
}

impl From<u128> for Uuid {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<Uuid> for u128 {
    fn from(id: Uuid) -> Self {
        id.as_u128()
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Name space for fully-qualified domain names (RFC 4122 appendix C)
pub const NAMESPACE_DNS: Uuid =
    Uuid::from_fields(0x6BA7B810, 0x9DAD, 0x11D1, 0x80, 0xB4, 0x00C04FD430C8);

/// Name space for URLs
pub const NAMESPACE_URL: Uuid =
    Uuid::from_fields(0x6BA7B811, 0x9DAD, 0x11D1, 0x80, 0xB4, 0x00C04FD430C8);

/// Name space for ISO object identifiers
pub const NAMESPACE_OID: Uuid =
    Uuid::from_fields(0x6BA7B812, 0x9DAD, 0x11D1, 0x80, 0xB4, 0x00C04FD430C8);

/// Name space for X.500 distinguished names
pub const NAMESPACE_X500: Uuid =
    Uuid::from_fields(0x6BA7B814, 0x9DAD, 0x11D1, 0x80, 0xB4, 0x00C04FD430C8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_only_touches_version_and_variant() {
        let id = Uuid::from_bytes([0xFF; 16]).stamp(0b0100_0000, 0b1000_0000);
        assert_eq!(id.as_bytes()[6], 0x4F);
        assert_eq!(id.as_bytes()[8], 0xBF);
        assert_eq!(id.version(), Version::Random);
        assert_eq!(id.variant(), Variant::Standard);
        for (i, byte) in id.as_bytes().iter().enumerate() {
            if i != 6 && i != 8 {
                assert_eq!(*byte, 0xFF);
            }
        }
    }

    #[test]
    fn test_namespace_bytes() {
        assert_eq!(
            NAMESPACE_DNS.into_bytes(),
            [
                0x6B, 0xA7, 0xB8, 0x10, 0x9D, 0xAD, 0x11, 0xD1, 0x80, 0xB4, 0x00, 0xC0, 0x4F, 0xD4,
                0x30, 0xC8
            ]
        );
        assert_eq!(NAMESPACE_X500.time_low(), 0x6BA7B814);
        assert_eq!(NAMESPACE_URL.version(), Version::Time);
        assert_eq!(NAMESPACE_OID.variant(), Variant::Standard);
    }
}
