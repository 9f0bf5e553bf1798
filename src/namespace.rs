//! Namespaces for name-based identifiers
//!
//! Accepts the four well-known names (`dns`, `url`, `oid`, `x500`, any case)
//! or any identifier in a dialect the parser understands.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use uuidkit_core::{NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500, ParseError, Uuid};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("Unknown namespace '{name}': expected dns, url, oid, x500 or a UUID ({source})")]
    Unknown {
        name: String,
        #[source]
        source: ParseError,
    },
}

/// A namespace for version 5 generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Dns,
    Url,
    Oid,
    X500,
    Custom(Uuid),
}

impl Namespace {
    pub fn uuid(&self) -> Uuid {
        match self {
            Namespace::Dns => NAMESPACE_DNS,
            Namespace::Url => NAMESPACE_URL,
            Namespace::Oid => NAMESPACE_OID,
            Namespace::X500 => NAMESPACE_X500,
            Namespace::Custom(id) => *id,
        }
    }

    /// Name-based identifier for `name` in this namespace
    pub fn derive(&self, name: impl AsRef<[u8]>) -> Uuid {
        Uuid::new_v5(&self.uuid(), name)
    }
}

impl FromStr for Namespace {
    type Err = NamespaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dns" => Ok(Namespace::Dns),
            "url" => Ok(Namespace::Url),
            "oid" => Ok(Namespace::Oid),
            "x500" => Ok(Namespace::X500),
            _ => s
                .parse::<Uuid>()
                .map(Namespace::Custom)
                .map_err(|source| NamespaceError::Unknown {
                    name: s.to_string(),
                    source,
                }),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Dns => f.write_str("dns"),
            Namespace::Url => f.write_str("url"),
            Namespace::Oid => f.write_str("oid"),
            Namespace::X500 => f.write_str("x500"),
            Namespace::Custom(id) => write!(f, "{}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_names() {
        assert_eq!("dns".parse::<Namespace>(), Ok(Namespace::Dns));
        assert_eq!("URL".parse::<Namespace>(), Ok(Namespace::Url));
        assert_eq!(" oid ".parse::<Namespace>(), Ok(Namespace::Oid));
        assert_eq!("X500".parse::<Namespace>().map(|ns| ns.uuid()), Ok(NAMESPACE_X500));
    }

    #[test]
    fn test_custom_namespace() {
        let ns: Namespace = "{6ba7b810-9dad-11d1-80b4-00c04fd430c8}".parse().unwrap();
        assert_eq!(ns, Namespace::Custom(NAMESPACE_DNS));
        assert_eq!(ns.derive("test"), Namespace::Dns.derive("test"));
        assert_eq!(
            Namespace::Dns.derive("test").to_string(),
            "4BE0643F-1D98-573B-97CD-CA98A65347DD"
        );
    }

    #[test]
    fn test_unknown_namespace() {
        let err = "ftp".parse::<Namespace>().unwrap_err();
        assert!(matches!(err, NamespaceError::Unknown { ref name, .. } if name == "ftp"));
        assert!(err.to_string().starts_with("Unknown namespace 'ftp'"));
    }
}
