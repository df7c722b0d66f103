//! JSON-loadable registry description.
//!
//! A snapshot is configuration input for `InMemoryRegistry`, mirroring
//! how issuer tables are usually written down by hand: IIN ranges rather
//! than one row per prefix, and lengths either as a list or as the
//! comma-separated text older tables use.
//!
//! ```
//! use rust_pan::registry::{IssuerRegistry, RegistrySnapshot};
//!
//! let snapshot = RegistrySnapshot::from_json(r#"{
//!     "major_industries": [{ "digit": 5, "issuer_category": "Banking and financial" }],
//!     "issuers": [{ "network_name": "Mastercard", "valid_lengths": [16] }],
//!     "iins": [{ "issuer": "Mastercard", "ranges": [[51, 55], [2221, 2720]] }]
//! }"#).unwrap();
//!
//! let registry = snapshot.into_registry().unwrap();
//! assert!(registry.find_iin("2720").is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::memory::{InMemoryRegistry, RegistryBuilder};
use super::records::MajorIndustry;
use crate::error::{RegistryError, Result};

/// Serializable registry contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    /// One row per registered leading digit.
    #[serde(default)]
    pub major_industries: Vec<MajorIndustry>,

    /// Issuers and their accepted lengths.
    #[serde(default)]
    pub issuers: Vec<IssuerEntry>,

    /// IIN prefixes grouped by issuer.
    #[serde(default)]
    pub iins: Vec<IinEntry>,
}

/// Issuer row in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerEntry {
    /// Network name.
    pub network_name: String,
    /// Accepted lengths.
    pub valid_lengths: LengthSpec,
}

/// Accepted lengths, as a list (`[16, 18, 19]`) or text (`"16,18,19"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthSpec {
    /// Explicit list.
    List(Vec<u8>),
    /// Comma-separated text.
    Text(String),
}

/// All IIN prefixes of one issuer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IinEntry {
    /// Owning network name.
    pub issuer: String,
    /// Prefixes and prefix ranges.
    pub ranges: Vec<IinRange>,
}

/// A single prefix or an inclusive numeric range of prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IinRange {
    /// One numeric prefix, e.g. `4`.
    Single(u32),
    /// One textual prefix; keeps leading zeros.
    Prefix(String),
    /// Inclusive range, e.g. `[2221, 2720]`.
    Range(u32, u32),
}

impl RegistrySnapshot {
    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Feed every row into a registry builder.
    #[must_use]
    pub fn into_builder(self) -> RegistryBuilder {
        let mut builder = InMemoryRegistry::builder();

        for row in self.major_industries {
            builder = builder.with_major_industry(row.digit, row.issuer_category);
        }

        for entry in self.issuers {
            builder = match entry.valid_lengths {
                LengthSpec::List(lengths) => builder.with_issuer(entry.network_name, lengths),
                LengthSpec::Text(text) => builder.with_issuer_lengths(entry.network_name, &text),
            };
        }

        for entry in self.iins {
            for range in entry.ranges {
                builder = match range {
                    IinRange::Single(value) => builder.with_iin(value.to_string(), entry.issuer.as_str()),
                    IinRange::Prefix(prefix) => builder.with_iin(prefix, entry.issuer.as_str()),
                    IinRange::Range(start, end) => builder.with_iin_range(start, end, entry.issuer.as_str()),
                };
            }
        }

        builder
    }

    /// Validate into a queryable registry.
    pub fn into_registry(self) -> std::result::Result<InMemoryRegistry, RegistryError> {
        self.into_builder().build()
    }
}

impl InMemoryRegistry {
    /// Build a registry from a snapshot.
    pub fn from_snapshot(snapshot: RegistrySnapshot) -> std::result::Result<Self, RegistryError> {
        snapshot.into_registry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::registry::IssuerRegistry;

    const SOLO: &str = r#"{
        "issuers": [{ "network_name": "Solo", "valid_lengths": "16,18,19" }],
        "iins": [{ "issuer": "Solo", "ranges": [6334, "6767"] }]
    }"#;

    #[test]
    fn test_text_lengths_and_mixed_prefixes() {
        let registry = RegistrySnapshot::from_json(SOLO).unwrap().into_registry().unwrap();

        let solo = registry.find_iin("6334").unwrap();
        assert_eq!(solo.valid_lengths.as_slice(), &[16, 18, 19]);
        assert!(registry.find_iin("6767").is_some());
        assert!(registry.major_industry(6).is_none());
    }

    #[test]
    fn test_range_expansion() {
        let snapshot = RegistrySnapshot {
            issuers: vec![IssuerEntry {
                network_name: "JCB".into(),
                valid_lengths: LengthSpec::List(vec![16, 17, 18, 19]),
            }],
            iins: vec![IinEntry {
                issuer: "JCB".into(),
                ranges: vec![IinRange::Range(3528, 3589)],
            }],
            ..Default::default()
        };

        let registry = InMemoryRegistry::from_snapshot(snapshot).unwrap();
        assert_eq!(registry.iin_count(), 62);
        assert!(registry.find_iin("3527").is_none());
        assert!(registry.find_iin("3528").is_some());
        assert!(registry.find_iin("3589").is_some());
    }

    #[test]
    fn test_leading_zero_prefix_kept() {
        let json = r#"{
            "issuers": [{ "network_name": "Test", "valid_lengths": [16] }],
            "iins": [{ "issuer": "Test", "ranges": ["0042"] }]
        }"#;
        let registry = RegistrySnapshot::from_json(json).unwrap().into_registry().unwrap();
        assert!(registry.find_iin("0042").is_some());
        assert!(registry.find_iin("42").is_none());
    }

    #[test]
    fn test_integrity_errors_surface() {
        let json = r#"{
            "issuers": [{ "network_name": "Visa", "valid_lengths": [16] }],
            "iins": [{ "issuer": "Visa", "ranges": [4, 41] }]
        }"#;
        let err = RegistrySnapshot::from_json(json).unwrap().into_registry().unwrap_err();
        assert!(matches!(err, RegistryError::AmbiguousPrefix { .. }));
    }

    #[test]
    fn test_bad_json() {
        let err = RegistrySnapshot::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = RegistrySnapshot::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_empty_snapshot() {
        let registry = RegistrySnapshot::from_json("{}").unwrap().into_registry().unwrap();
        assert!(registry.is_empty());
    }
}
