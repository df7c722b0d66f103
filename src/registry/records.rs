//! Registry records: major industries, issuers, and IIN prefixes.
//!
//! These are read-only reference data. Classification and generation
//! borrow them from a registry for the duration of one call.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{RegistryError, MAX_PAN_LENGTH};

/// Issuer category for one Major Industry Identifier digit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorIndustry {
    /// Leading digit of the card number (0-9).
    pub digit: u8,

    /// Human-readable category, e.g. "Banking and financial".
    pub issuer_category: String,
}

impl MajorIndustry {
    /// Create a major industry row.
    #[must_use]
    pub fn new(digit: u8, issuer_category: impl Into<String>) -> Self {
        Self {
            digit,
            issuer_category: issuer_category.into(),
        }
    }
}

/// Accepted card lengths. Most issuers have one to four.
pub type LengthSet = SmallVec<[u8; 4]>;

/// A payment network and the card lengths it issues.
///
/// Lengths are not necessarily contiguous (Solo accepts 16, 18 and 19),
/// so they are kept as a set rather than a min/max pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    /// Network name; the issuer's key.
    pub network_name: String,

    /// Accepted lengths, sorted and de-duplicated.
    pub valid_lengths: LengthSet,
}

impl Issuer {
    /// Create an issuer. Lengths are sorted and de-duplicated.
    #[must_use]
    pub fn new(network_name: impl Into<String>, lengths: impl IntoIterator<Item = u8>) -> Self {
        let mut valid_lengths: LengthSet = lengths.into_iter().collect();
        valid_lengths.sort_unstable();
        valid_lengths.dedup();
        Self {
            network_name: network_name.into(),
            valid_lengths,
        }
    }

    /// Create an issuer from a comma-separated length list such as `"16,18,19"`.
    ///
    /// ```
    /// use rust_pan::registry::Issuer;
    ///
    /// let solo = Issuer::parse_lengths("Solo", "19, 16,18").unwrap();
    /// assert_eq!(solo.valid_lengths.as_slice(), &[16, 18, 19]);
    /// assert!(Issuer::parse_lengths("Solo", "16,x").is_err());
    /// ```
    pub fn parse_lengths(network_name: impl Into<String>, lengths: &str) -> Result<Self, RegistryError> {
        let network_name = network_name.into();
        let mut parsed = LengthSet::new();

        for part in lengths.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<u8>() {
                Ok(length) => parsed.push(length),
                Err(_) => {
                    return Err(RegistryError::InvalidLength {
                        issuer: network_name,
                        length: part.to_string(),
                    })
                }
            }
        }

        Ok(Self::new(network_name, parsed))
    }

    /// Does this issuer accept a card of `length` digits?
    #[must_use]
    pub fn accepts_length(&self, length: usize) -> bool {
        self.valid_lengths.iter().any(|&l| usize::from(l) == length)
    }

    /// Check the length set on its own: non-empty, every length in `1..=19`.
    pub(crate) fn validate_lengths(&self) -> Result<(), RegistryError> {
        if self.valid_lengths.is_empty() {
            return Err(RegistryError::NoLengths(self.network_name.clone()));
        }
        if let Some(&bad) = self
            .valid_lengths
            .iter()
            .find(|&&l| l == 0 || usize::from(l) > MAX_PAN_LENGTH)
        {
            return Err(RegistryError::InvalidLength {
                issuer: self.network_name.clone(),
                length: bad.to_string(),
            });
        }
        Ok(())
    }
}

/// Issuer Identification Number: a 1-6 digit prefix owned by one issuer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Iin {
    /// Prefix digits as text (leading zeros are significant).
    pub prefix: String,

    /// Network name of the owning issuer.
    pub issuer: String,
}

impl Iin {
    /// Create an IIN record.
    #[must_use]
    pub fn new(prefix: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            issuer: issuer.into(),
        }
    }
}
