//! SHA-1 and RFC 4122 constants
//!
//! Everything that is fixed by FIPS 180-4 or RFC 4122 lives here so the
//! algorithm modules only carry logic.

/// SHA-1 block size in bytes
pub const BLOCK_SIZE: usize = 64;

/// Offset inside the final block where the 64-bit message length starts
pub const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// SHA-1 digest size in bytes (160 bits)
pub const DIGEST_SIZE: usize = 20;

/// Length of the SHA-1 digest rendered as hex
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

/// Number of compression rounds per block
pub const ROUNDS: usize = 80;

/// Initial accumulator values (FIPS 180-4, 5.3.1)
pub const SHA1_IV: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// Additive round constants, one per group of 20 rounds
pub const ROUND_CONSTANTS: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

/// UUID size in bytes
pub const UUID_SIZE: usize = 16;

/// Number of hex digits in a UUID
pub const UUID_DIGITS: usize = UUID_SIZE * 2;

/// Length of the canonical hyphenated text form
pub const UUID_TEXT_LEN: usize = 36;

/// Byte carrying the version nibble
pub const VERSION_BYTE: usize = 6;

/// Byte carrying the variant bits
pub const VARIANT_BYTE: usize = 8;

/// Version 4 (random) nibble, already shifted into place
pub const VERSION_RANDOM: u8 = 0b0100_0000;

/// Version 5 (name-based, SHA-1) nibble, already shifted into place
pub const VERSION_NAME_SHA1: u8 = 0b0101_0000;

/// RFC 4122 variant bits `10`, already shifted into place
pub const VARIANT_STANDARD: u8 = 0b1000_0000;
