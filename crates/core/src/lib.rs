//! # uuidkit core
//!
//! A streaming SHA-1 engine and RFC 4122 identifiers built on it.
//!
//! ## Features
//!
//! - **SHA-1**: incremental, chunking-independent, idempotent `finish`
//! - **Layout**: 16 bytes in RFC 4122 field order on every host
//! - **Generation**: random (v4) from an explicit entropy source, name-based (v5)
//! - **Parsing**: hyphenated, compact, braced and whitespace-separated forms
//! - **Formatting**: canonical `8-4-4-4-12` text in one pass
//!
//! ## Example
//!
//! ```rust
//! use uuidkit_core::{NAMESPACE_DNS, Generator, Uuid, Version, sha1};
//!
//! // Single-shot hashing
//! let digest = sha1(b"The quick brown fox jumps over the lazy dog");
//! assert_eq!(digest.to_string(), "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12");
//!
//! // Name-based identifiers are deterministic
//! let id = Uuid::new_v5(&NAMESPACE_DNS, "test");
//! assert_eq!(id.to_string(), "4BE0643F-1D98-573B-97CD-CA98A65347DD");
//!
//! // Random identifiers come from a generator that owns its entropy
//! let mut generator = Generator::new();
//! let random = generator.generate();
//! assert_eq!(random.version(), Version::Random);
//!
//! // Text round-trips in any accepted dialect
//! assert_eq!(Uuid::parse(&format!("{{{:x}}}", random)), Some(random));
//! ```
//!
//! ## Cargo features
//!
//! - `os-entropy` (default): random identifiers use the operating system's
//!   facility; without it a clock-seeded PRNG is used
//! - `serde`: `Uuid` (de)serializes as its canonical string, `Digest` as hex

mod format;
mod generate;
mod params;
mod parse;
mod primitives;
mod sha1;
mod uuid;

mod ffi;

pub use format::{Case, encode};
#[cfg(feature = "os-entropy")]
pub use generate::OsEntropy;
pub use generate::{
    DefaultEntropy, EntropySource, Generator, SeededEntropy, SharedEntropy, generate_named,
};
pub use params::{BLOCK_SIZE, DIGEST_HEX_LEN, DIGEST_SIZE, UUID_SIZE, UUID_TEXT_LEN};
pub use parse::{ParseError, parse_chars, try_parse_utf16};
pub use sha1::{Digest, Sha1, sha1};
pub use uuid::{NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500, Uuid, Variant, Version};
