//! uuidkit Library
//!
//! SHA-1 digests and RFC 4122 identifiers, plus the pieces the `uuidkit`
//! command-line tool is built from.
//!
//! # Overview
//!
//! The algorithm lives in `uuidkit-core` and is re-exported here as
//! [`algorithm`]. This crate adds namespace selection by name and a
//! serializable field report.
//!
//! # Example
//!
//! ```rust
//! use uuidkit::{Namespace, UuidReport};
//! use uuidkit::algorithm::Case;
//!
//! let ns: Namespace = "dns".parse().unwrap();
//! let id = ns.derive("www.example.org");
//! assert_eq!(id.to_string(), "74738FF5-5367-5958-9AEE-98FFFDCD1876");
//!
//! let report = UuidReport::new(&id, Case::Lower);
//! assert_eq!(report.version, "name-sha1");
//! ```

// Re-export the core algorithm
pub use uuidkit_core as algorithm;

pub mod namespace;
pub mod report;

// Convenience re-exports
pub use algorithm::{sha1, Digest, Generator, ParseError, Sha1, Uuid, Variant, Version};
pub use namespace::{Namespace, NamespaceError};
pub use report::{FieldReport, UuidReport};
