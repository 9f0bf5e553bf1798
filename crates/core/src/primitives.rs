//! Portable bit manipulation shared by the hash engine and the UUID layout
//!
//! All byte-order handling goes through the `*_to_wire` / `*_from_wire`
//! pairs below. Wire order is big-endian (network order), which is both the
//! SHA-1 word order and the RFC 4122 field order. The byte swap happens here,
//! once, on little-endian hosts; callers never branch on host endianness.

/// 32-bit rotate left
#[inline(always)]
pub const fn rotl32(value: u32, bits: u32) -> u32 {
    value.rotate_left(bits)
}

macro_rules! wire_conversions {
    ($($ty:ty => $swap:ident, $to:ident, $from:ident, $n:expr;)*) => {
        $(
            #[doc = concat!("Reverse the byte order of a `", stringify!($ty), "`")]
            #[inline(always)]
            pub const fn $swap(value: $ty) -> $ty {
                value.swap_bytes()
            }

            #[doc = concat!("Encode a `", stringify!($ty), "` in wire (big-endian) order")]
            #[inline(always)]
            pub const fn $to(value: $ty) -> [u8; $n] {
                let wire = if cfg!(target_endian = "little") { $swap(value) } else { value };
                wire.to_ne_bytes()
            }

            #[doc = concat!("Decode a `", stringify!($ty), "` from wire (big-endian) order")]
            #[inline(always)]
            pub const fn $from(bytes: [u8; $n]) -> $ty {
                let wire = <$ty>::from_ne_bytes(bytes);
                if cfg!(target_endian = "little") { $swap(wire) } else { wire }
            }
        )*
    };
}

wire_conversions! {
    u16 => byte_swap16, u16_to_wire, u16_from_wire, 2;
    u32 => byte_swap32, u32_to_wire, u32_from_wire, 4;
    u64 => byte_swap64, u64_to_wire, u64_from_wire, 8;
    u128 => byte_swap128, u128_to_wire, u128_from_wire, 16;
}

const WORD_SIZE: usize = core::mem::size_of::<usize>();

/// Reverse the byte order of a machine word
#[inline(always)]
pub const fn byte_swap_usize(value: usize) -> usize {
    value.swap_bytes()
}

/// Decode a machine word from wire (big-endian) order
///
/// Words are only ever read, for hashing; there is no encoding counterpart.
#[inline(always)]
pub const fn usize_from_wire(bytes: [u8; WORD_SIZE]) -> usize {
    let wire = usize::from_ne_bytes(bytes);
    if cfg!(target_endian = "little") { byte_swap_usize(wire) } else { wire }
}

/// Copy `N` bytes out of `src` starting at `at`
#[inline(always)]
pub const fn take<const N: usize>(src: &[u8], at: usize) -> [u8; N] {
    let mut out = [0u8; N];
    let mut i = 0;
    while i < N {
        out[i] = src[at + i];
        i += 1;
    }
    out
}

/// Copy `N` bytes into `dst` starting at `at`
#[inline(always)]
pub const fn put<const N: usize>(dst: &mut [u8], at: usize, src: [u8; N]) {
    let mut i = 0;
    while i < N {
        dst[at + i] = src[i];
        i += 1;
    }
}

pub const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";
pub const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Render one byte as two hex characters using the given digit table
#[inline(always)]
pub const fn byte_to_hex(byte: u8, digits: &[u8; 16]) -> [u8; 2] {
    [digits[(byte >> 4) as usize], digits[(byte & 0x0F) as usize]]
}

/// Value of a hexadecimal digit in either case
#[inline(always)]
pub const fn hex_value(ch: char) -> Option<u8> {
    match ch {
        '0'..='9' => Some(ch as u8 - b'0'),
        'a'..='f' => Some(ch as u8 - b'a' + 10),
        'A'..='F' => Some(ch as u8 - b'A' + 10),
        _ => None,
    }
}

#[cfg(target_pointer_width = "64")]
mod combiner_params {
    pub const OFFSET: usize = 0x9E3779B97F4A7C15;
    pub const LEFT_SHIFT: u32 = 12;
    pub const RIGHT_SHIFT: u32 = 4;
}

#[cfg(target_pointer_width = "32")]
mod combiner_params {
    pub const OFFSET: usize = 0x9E3779B9;
    pub const LEFT_SHIFT: u32 = 6;
    pub const RIGHT_SHIFT: u32 = 2;
}

#[cfg(target_pointer_width = "16")]
mod combiner_params {
    pub const OFFSET: usize = 0x9E37;
    pub const LEFT_SHIFT: u32 = 3;
    pub const RIGHT_SHIFT: u32 = 1;
}

/// Word-sized non-cryptographic hash combiner
///
/// Folds word-sized chunks into an accumulator seeded with the first chunk:
/// `h ^= chunk + K + (h << L) + (h >> R)`, where `K` is the golden-ratio
/// constant for the platform word size. Only suitable for hash-table placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashCombiner {
    value: usize,
}

impl HashCombiner {
    #[inline(always)]
    pub const fn new(seed: usize) -> Self {
        Self { value: seed }
    }

    #[inline(always)]
    pub const fn combine(&mut self, hash: usize) -> &mut Self {
        let mixed = hash
            .wrapping_add(combiner_params::OFFSET)
            .wrapping_add(self.value << combiner_params::LEFT_SHIFT)
            .wrapping_add(self.value >> combiner_params::RIGHT_SHIFT);
        self.value ^= mixed;
        self
    }

    #[inline(always)]
    pub const fn value(&self) -> usize {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_order_is_big_endian() {
        assert_eq!(u32_to_wire(0x0011_2233), [0x00, 0x11, 0x22, 0x33]);
        assert_eq!(u16_from_wire([0xAB, 0xCD]), 0xABCD);
        assert_eq!(u64_from_wire(u64_to_wire(0x0102_0304_0506_0708)), 0x0102_0304_0506_0708);
        assert_eq!(u128_to_wire(1)[15], 1);
    }

    #[test]
    fn test_byte_swap() {
        assert_eq!(byte_swap16(0xABCD), 0xCDAB);
        assert_eq!(byte_swap32(0x0011_2233), 0x3322_1100);
        assert_eq!(byte_swap64(0x0102_0304_0506_0708), 0x0807_0605_0403_0201);
        assert_eq!(byte_swap128(1), 1u128 << 120);
        assert_eq!(byte_swap_usize(byte_swap_usize(0x1234)), 0x1234);
        let mut word = [0u8; WORD_SIZE];
        word[WORD_SIZE - 1] = 0x2A;
        assert_eq!(usize_from_wire(word), 0x2A);
    }

    #[test]
    fn test_take_and_put() {
        let mut buf = [0u8; 8];
        put(&mut buf, 2, [0xAA, 0xBB, 0xCC]);
        assert_eq!(buf, [0, 0, 0xAA, 0xBB, 0xCC, 0, 0, 0]);
        assert_eq!(take::<2>(&buf, 3), [0xBB, 0xCC]);
    }

    #[test]
    fn test_rotl32() {
        assert_eq!(rotl32(0x8000_0001, 1), 0x0000_0003);
        assert_eq!(rotl32(0x1234_5678, 0), 0x1234_5678);
        assert_eq!(rotl32(0x1234_5678, 30), 0x1234_5678u32.rotate_right(2));
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(byte_to_hex(0x9F, HEX_LOWER), *b"9f");
        assert_eq!(byte_to_hex(0x9F, HEX_UPPER), *b"9F");
        assert_eq!(hex_value('b'), Some(11));
        assert_eq!(hex_value('B'), Some(11));
        assert_eq!(hex_value('g'), None);
        assert_eq!(hex_value('-'), None);
    }

    #[test]
    fn test_combiner_depends_on_order() {
        let mut ab = HashCombiner::new(1);
        ab.combine(2).combine(3);
        let mut ba = HashCombiner::new(1);
        ba.combine(3).combine(2);
        assert_ne!(ab.value(), ba.value());
        assert_ne!(ab.value(), HashCombiner::new(1).value());
    }
}
