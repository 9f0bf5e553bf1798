//! Streaming SHA-1 (FIPS 180-4)
//!
//! Merkle-Damgard over 64-byte blocks. Input is buffered until a block is
//! full, each full block runs the 80-round compression, and `finish` applies
//! the standard padding (`0x80`, zeros up to byte 56, 64-bit big-endian bit
//! length) before producing the 160-bit digest.
//!
//! Chunking never affects the result: feeding a message one byte at a time
//! or in a single slice yields the same digest.

use core::fmt;
use std::io;

use crate::params::*;
use crate::primitives::{put, rotl32, take, u32_from_wire, u32_to_wire, u64_to_wire};

/// 160-bit SHA-1 digest
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.0
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Lowercase hex, most significant byte first
impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// SHA-1 hasher
///
/// Holds single-owner mutable state: share results, not instances. After
/// [`Sha1::finish`] the accumulators hold the final digest and further input
/// is ignored until [`Sha1::reset`].
#[derive(Clone, Debug)]
pub struct Sha1 {
    /// Accumulator words, seeded with the IV
    state: [u32; 5],
    /// Pending partial block
    block: [u8; BLOCK_SIZE],
    /// Bytes currently buffered in `block` (always < 64 between calls)
    block_len: usize,
    /// Fully compressed blocks so far
    processed_blocks: u64,
    finished: bool,
}

impl Sha1 {
    pub const fn new() -> Self {
        Self {
            state: SHA1_IV,
            block: [0u8; BLOCK_SIZE],
            block_len: 0,
            processed_blocks: 0,
            finished: false,
        }
    }

    /// Append a single byte
    pub fn update_byte(&mut self, byte: u8) -> &mut Self {
        if !self.finished {
            self.push(byte);
        }
        self
    }

    /// Append a slice of bytes
    pub fn update(&mut self, data: &[u8]) -> &mut Self {
        if self.finished || data.is_empty() {
            return self;
        }

        let mut rest = data;

        // Top up a partially filled block first
        if self.block_len > 0 {
            let fill = (BLOCK_SIZE - self.block_len).min(rest.len());
            self.block[self.block_len..self.block_len + fill].copy_from_slice(&rest[..fill]);
            self.block_len += fill;
            rest = &rest[fill..];

            if self.block_len < BLOCK_SIZE {
                return self;
            }
            compress(&mut self.state, &self.block);
            self.processed_blocks += 1;
            self.block_len = 0;
        }

        // Whole blocks straight from the input
        let mut blocks = rest.chunks_exact(BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
            self.processed_blocks += 1;
        }

        let tail = blocks.remainder();
        self.block[..tail.len()].copy_from_slice(tail);
        self.block_len = tail.len();
        self
    }

    /// Append text as its UTF-8 bytes
    pub fn update_str(&mut self, text: &str) -> &mut Self {
        self.update(text.as_bytes())
    }

    /// Append a sequence of code points, transcoded to UTF-8
    pub fn update_chars<I: IntoIterator<Item = char>>(&mut self, chars: I) -> &mut Self {
        let mut buf = [0u8; 4];
        for ch in chars {
            if self.finished {
                break;
            }
            self.update(ch.encode_utf8(&mut buf).as_bytes());
        }
        self
    }

    /// Apply the final padding and return the digest
    ///
    /// Idempotent: later calls return the same digest without touching state.
    pub fn finish(&mut self) -> Digest {
        if !self.finished {
            let total_bytes = self
                .processed_blocks
                .wrapping_mul(BLOCK_SIZE as u64)
                .wrapping_add(self.block_len as u64);
            let bit_len = total_bytes.wrapping_mul(8);

            self.push(0x80);

            // Zero-fill up to the length field, spilling into a fresh block
            // when the marker landed past it.
            while self.block_len != LENGTH_OFFSET {
                self.push(0);
            }

            put(&mut self.block, LENGTH_OFFSET, u64_to_wire(bit_len));
            compress(&mut self.state, &self.block);
            self.processed_blocks += 1;
            self.block_len = 0;
            self.finished = true;
        }
        self.digest()
    }

    /// The digest, once [`Sha1::finish`] has been called
    pub fn value(&self) -> Option<Digest> {
        self.finished.then(|| self.digest())
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Return to the initial state so the hasher can be reused
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn push(&mut self, byte: u8) {
        self.block[self.block_len] = byte;
        self.block_len += 1;
        if self.block_len == BLOCK_SIZE {
            compress(&mut self.state, &self.block);
            self.processed_blocks += 1;
            self.block_len = 0;
        }
    }

    fn digest(&self) -> Digest {
        let mut out = [0u8; DIGEST_SIZE];
        for (i, word) in self.state.iter().enumerate() {
            put(&mut out, i * 4, u32_to_wire(*word));
        }
        Digest(out)
    }
}

impl Default for Sha1 {
    fn default() -> Self {
        Self::new()
    }
}

/// Lets readers be streamed in with `io::copy`
impl io::Write for Sha1 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Convenience function for single-shot hashing
pub fn sha1(data: &[u8]) -> Digest {
    let mut hasher = Sha1::new();
    hasher.update(data);
    hasher.finish()
}

#[inline(always)]
fn choice(x: u32, y: u32, z: u32) -> u32 {
    ((y ^ z) & x) ^ z
}

#[inline(always)]
fn parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn majority(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

/// SHA-1 compression of one 64-byte block into the accumulators
///
/// The message schedule is kept as a rolling window of 16 words:
/// `W[t] = rotl1(W[t-3] ^ W[t-8] ^ W[t-14] ^ W[t-16])`.
#[inline(always)]
fn compress(state: &mut [u32; 5], block: &[u8]) {
    debug_assert_eq!(block.len(), BLOCK_SIZE);

    let mut w = [0u32; 16];
    for (i, word) in w.iter_mut().enumerate() {
        *word = u32_from_wire(take::<4>(block, i * 4));
    }

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for t in 0..ROUNDS {
        let word = if t < 16 {
            w[t]
        } else {
            let next = rotl32(
                w[(t + 13) & 15] ^ w[(t + 8) & 15] ^ w[(t + 2) & 15] ^ w[t & 15],
                1,
            );
            w[t & 15] = next;
            next
        };

        let (f, k) = match t / 20 {
            0 => (choice(b, c, d), ROUND_CONSTANTS[0]),
            1 => (parity(b, c, d), ROUND_CONSTANTS[1]),
            2 => (majority(b, c, d), ROUND_CONSTANTS[2]),
            _ => (parity(b, c, d), ROUND_CONSTANTS[3]),
        };

        let temp = rotl32(a, 5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(word);
        e = d;
        d = c;
        c = rotl32(b, 30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_functions() {
        assert_eq!(choice(0xFFFF_0000, 0x1234_5678, 0x9ABC_DEF0), 0x1234_DEF0);
        assert_eq!(parity(0xF0F0_F0F0, 0x0F0F_0F0F, 0xFFFF_FFFF), 0);
        assert_eq!(majority(0b1100, 0b1010, 0b0110), 0b1110);
    }

    #[test]
    fn test_compress_changes_state() {
        let mut state = SHA1_IV;
        compress(&mut state, &[0u8; BLOCK_SIZE]);
        assert_ne!(state, SHA1_IV);

        let mut again = SHA1_IV;
        compress(&mut again, &[0u8; BLOCK_SIZE]);
        assert_eq!(state, again);
    }

    #[test]
    fn test_value_before_finish_is_none() {
        let mut hasher = Sha1::new();
        hasher.update(b"abc");
        assert!(hasher.value().is_none());
        assert!(!hasher.is_finished());
        let digest = hasher.finish();
        assert_eq!(hasher.value(), Some(digest));
    }

    #[test]
    fn test_block_len_stays_below_block_size() {
        let mut hasher = Sha1::new();
        for len in [1usize, 63, 64, 65, 127, 128, 200] {
            hasher.update(&vec![0x5Au8; len]);
            assert!(hasher.block_len < BLOCK_SIZE);
        }
    }
}
