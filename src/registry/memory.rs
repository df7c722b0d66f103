//! Hash-indexed in-memory registry.
//!
//! `InMemoryRegistry` can only be obtained from `RegistryBuilder::build`
//! (directly, via a `RegistrySnapshot`, or via `well_known()`), so every
//! instance has passed integrity validation.

use rustc_hash::{FxHashMap, FxHashSet};

use super::records::{Iin, Issuer, MajorIndustry};
use super::IssuerRegistry;
use crate::error::{RegistryError, MAX_IIN_LENGTH};

/// In-memory issuer registry.
///
/// ## Example
///
/// ```
/// use rust_pan::registry::{InMemoryRegistry, IssuerRegistry};
///
/// let registry = InMemoryRegistry::builder()
///     .with_major_industry(4, "Banking and financial")
///     .with_issuer("Visa", [13, 16, 19])
///     .with_iin("4", "Visa")
///     .build()
///     .unwrap();
///
/// let visa = registry.find_iin("4").unwrap();
/// assert_eq!(visa.network_name, "Visa");
/// assert!(registry.find_iin("5").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryRegistry {
    industries: FxHashMap<u8, MajorIndustry>,
    issuers: FxHashMap<String, Issuer>,
    /// Prefix -> owning network name.
    iins: FxHashMap<String, String>,
    /// Network name -> owned IINs, sorted by prefix.
    by_issuer: FxHashMap<String, Vec<Iin>>,
}

impl InMemoryRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Number of registered issuers.
    #[must_use]
    pub fn issuer_count(&self) -> usize {
        self.issuers.len()
    }

    /// Number of registered IIN prefixes.
    #[must_use]
    pub fn iin_count(&self) -> usize {
        self.iins.len()
    }

    /// Check if the registry holds nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty() && self.issuers.is_empty()
    }

    /// Issuers sorted by network name.
    pub fn issuers(&self) -> impl Iterator<Item = &Issuer> {
        let mut issuers: Vec<_> = self.issuers.values().collect();
        issuers.sort_by(|a, b| a.network_name.cmp(&b.network_name));
        issuers.into_iter()
    }

    /// Major industry rows sorted by digit.
    pub fn major_industries(&self) -> impl Iterator<Item = &MajorIndustry> {
        let mut rows: Vec<_> = self.industries.values().collect();
        rows.sort_by_key(|m| m.digit);
        rows.into_iter()
    }
}

impl IssuerRegistry for InMemoryRegistry {
    fn find_iin(&self, prefix: &str) -> Option<&Issuer> {
        self.iins.get(prefix).and_then(|name| self.issuers.get(name))
    }

    fn find_issuer(&self, name: &str) -> Option<&Issuer> {
        self.issuers.get(name)
    }

    fn major_industry(&self, digit: u8) -> Option<&MajorIndustry> {
        self.industries.get(&digit)
    }

    fn iins_for_issuer(&self, issuer: &Issuer) -> Vec<&Iin> {
        self.by_issuer
            .get(&issuer.network_name)
            .map(|iins| iins.iter().collect())
            .unwrap_or_default()
    }
}

/// Collects registry rows and validates them into an `InMemoryRegistry`.
///
/// Rows are only checked in `build`, so they may be added in any order.
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    industries: Vec<MajorIndustry>,
    issuers: Vec<Issuer>,
    iins: Vec<Iin>,
    ranges: Vec<(u32, u32, String)>,
    errors: Vec<RegistryError>,
}

impl RegistryBuilder {
    /// Add a major industry row.
    #[must_use]
    pub fn with_major_industry(mut self, digit: u8, issuer_category: impl Into<String>) -> Self {
        self.industries.push(MajorIndustry::new(digit, issuer_category));
        self
    }

    /// Add an issuer with its accepted lengths.
    #[must_use]
    pub fn with_issuer(mut self, network_name: impl Into<String>, lengths: impl IntoIterator<Item = u8>) -> Self {
        self.issuers.push(Issuer::new(network_name, lengths));
        self
    }

    /// Add an issuer whose lengths are a comma-separated list (`"16,18,19"`).
    ///
    /// A malformed list is reported by `build`.
    #[must_use]
    pub fn with_issuer_lengths(mut self, network_name: impl Into<String>, lengths: &str) -> Self {
        match Issuer::parse_lengths(network_name, lengths) {
            Ok(issuer) => self.issuers.push(issuer),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Add a prebuilt issuer record.
    #[must_use]
    pub fn with_issuer_record(mut self, issuer: Issuer) -> Self {
        self.issuers.push(Issuer::new(issuer.network_name, issuer.valid_lengths));
        self
    }

    /// Add one IIN prefix.
    #[must_use]
    pub fn with_iin(mut self, prefix: impl Into<String>, issuer: impl Into<String>) -> Self {
        self.iins.push(Iin::new(prefix, issuer));
        self
    }

    /// Add every prefix in an inclusive numeric range, e.g. `2221..=2720`.
    #[must_use]
    pub fn with_iin_range(mut self, start: u32, end: u32, issuer: impl Into<String>) -> Self {
        self.ranges.push((start, end, issuer.into()));
        self
    }

    /// Validate and index the collected rows.
    ///
    /// The first integrity failure found is returned.
    pub fn build(mut self) -> Result<InMemoryRegistry, RegistryError> {
        if let Some(err) = self.errors.drain(..).next() {
            return Err(err);
        }

        let mut registry = InMemoryRegistry::default();

        for row in self.industries {
            if row.digit > 9 {
                return Err(RegistryError::InvalidMiiDigit(row.digit));
            }
            if registry.industries.contains_key(&row.digit) {
                return Err(RegistryError::DuplicateMajorIndustry(row.digit));
            }
            registry.industries.insert(row.digit, row);
        }

        for issuer in self.issuers {
            issuer.validate_lengths()?;
            if registry.issuers.contains_key(&issuer.network_name) {
                return Err(RegistryError::DuplicateIssuer(issuer.network_name));
            }
            registry.issuers.insert(issuer.network_name.clone(), issuer);
        }

        let mut iins = self.iins;
        for (start, end, issuer) in self.ranges {
            if start > end {
                return Err(RegistryError::EmptyRange { start, end });
            }
            iins.extend((start..=end).map(|value| Iin::new(value.to_string(), issuer.clone())));
        }

        for iin in iins {
            let well_formed = (1..=MAX_IIN_LENGTH).contains(&iin.prefix.len())
                && iin.prefix.bytes().all(|b| b.is_ascii_digit());
            if !well_formed {
                return Err(RegistryError::InvalidPrefix(iin.prefix));
            }

            let Some(issuer) = registry.issuers.get(&iin.issuer) else {
                return Err(RegistryError::UnknownIssuer {
                    prefix: iin.prefix,
                    issuer: iin.issuer,
                });
            };

            // Every length must leave room for at least the check digit.
            if let Some(&length) = issuer
                .valid_lengths
                .iter()
                .find(|&&l| usize::from(l) <= iin.prefix.len())
            {
                return Err(RegistryError::LengthTooShort {
                    issuer: iin.issuer,
                    length,
                    prefix: iin.prefix,
                });
            }

            if registry.iins.contains_key(&iin.prefix) {
                return Err(RegistryError::DuplicateIin(iin.prefix));
            }
            registry.iins.insert(iin.prefix.clone(), iin.issuer.clone());
            registry.by_issuer.entry(iin.issuer.clone()).or_default().push(iin);
        }

        check_ambiguous_prefixes(&registry.iins)?;

        for owned in registry.by_issuer.values_mut() {
            owned.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        }

        Ok(registry)
    }
}

/// Reject any prefix that is a proper prefix of another registered prefix.
fn check_ambiguous_prefixes(iins: &FxHashMap<String, String>) -> Result<(), RegistryError> {
    let mut longer: Vec<&String> = iins.keys().collect();
    longer.sort();

    let known: FxHashSet<&str> = iins.keys().map(String::as_str).collect();

    for prefix in longer {
        for len in 1..prefix.len() {
            let shorter = &prefix[..len];
            if known.contains(shorter) {
                return Err(RegistryError::AmbiguousPrefix {
                    shorter: shorter.to_string(),
                    shorter_issuer: iins[shorter].clone(),
                    longer: prefix.clone(),
                    longer_issuer: iins[prefix].clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegistryBuilder {
        InMemoryRegistry::builder()
            .with_major_industry(3, "Travel and entertainment")
            .with_major_industry(5, "Banking and financial")
            .with_issuer("Mastercard", [16])
            .with_issuer("American Express", [15])
            .with_iin_range(51, 55, "Mastercard")
            .with_iin("34", "American Express")
            .with_iin("37", "American Express")
    }

    #[test]
    fn test_build_and_lookup() {
        let registry = sample().build().unwrap();

        assert_eq!(registry.issuer_count(), 2);
        assert_eq!(registry.iin_count(), 7);
        assert_eq!(registry.find_iin("53").unwrap().network_name, "Mastercard");
        assert_eq!(registry.find_iin("37").unwrap().network_name, "American Express");
        assert!(registry.find_iin("5").is_none());
        assert!(registry.find_iin("56").is_none());

        assert_eq!(
            registry.major_industry(5).unwrap().issuer_category,
            "Banking and financial"
        );
        assert!(registry.major_industry(9).is_none());
    }

    #[test]
    fn test_find_issuer_exact_name() {
        let registry = sample().build().unwrap();

        assert!(registry.find_issuer("Mastercard").is_some());
        assert!(registry.find_issuer("mastercard").is_none());
        assert!(registry.find_issuer("").is_none());
    }

    #[test]
    fn test_iins_for_issuer_sorted() {
        let registry = sample().build().unwrap();
        let amex = registry.find_issuer("American Express").unwrap();

        let prefixes: Vec<_> = registry
            .iins_for_issuer(amex)
            .into_iter()
            .map(|i| i.prefix.as_str())
            .collect();
        assert_eq!(prefixes, vec!["34", "37"]);
    }

    #[test]
    fn test_issuers_sorted_by_name() {
        let registry = sample().build().unwrap();
        let names: Vec<_> = registry.issuers().map(|i| i.network_name.as_str()).collect();
        assert_eq!(names, vec!["American Express", "Mastercard"]);
    }

    #[test]
    fn test_duplicate_iin_rejected() {
        let err = sample().with_iin("51", "American Express").build().unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIin("51".into()));
    }

    #[test]
    fn test_duplicate_issuer_rejected() {
        let err = sample().with_issuer("Mastercard", [19]).build().unwrap_err();
        assert_eq!(err, RegistryError::DuplicateIssuer("Mastercard".into()));
    }

    #[test]
    fn test_unknown_issuer_rejected() {
        let err = sample().with_iin("4", "Visa").build().unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownIssuer {
                prefix: "4".into(),
                issuer: "Visa".into()
            }
        );
    }

    #[test]
    fn test_malformed_prefix_rejected() {
        for bad in ["", "1234567", "4a"] {
            let err = sample()
                .with_issuer("Other", [16])
                .with_iin(bad, "Other")
                .build()
                .unwrap_err();
            assert_eq!(err, RegistryError::InvalidPrefix(bad.into()));
        }
    }

    #[test]
    fn test_ambiguous_prefix_rejected() {
        let err = InMemoryRegistry::builder()
            .with_issuer("Visa", [16])
            .with_issuer("Visa Electron", [16])
            .with_iin("4", "Visa")
            .with_iin("4026", "Visa Electron")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::AmbiguousPrefix {
                shorter: "4".into(),
                shorter_issuer: "Visa".into(),
                longer: "4026".into(),
                longer_issuer: "Visa Electron".into(),
            }
        );
    }

    #[test]
    fn test_same_issuer_nested_prefix_still_ambiguous() {
        let err = InMemoryRegistry::builder()
            .with_issuer("Discover", [16])
            .with_iin("65", "Discover")
            .with_iin("6500", "Discover")
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::AmbiguousPrefix { .. }));
    }

    #[test]
    fn test_length_too_short_rejected() {
        let err = InMemoryRegistry::builder()
            .with_issuer("Tiny", [4, 16])
            .with_iin("1234", "Tiny")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::LengthTooShort {
                issuer: "Tiny".into(),
                length: 4,
                prefix: "1234".into()
            }
        );
    }

    #[test]
    fn test_bad_lengths_rejected() {
        let err = InMemoryRegistry::builder()
            .with_issuer_lengths("Solo", "16,eighteen")
            .build()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidLength { .. }));

        let err = InMemoryRegistry::builder()
            .with_issuer("Nothing", Vec::<u8>::new())
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::NoLengths("Nothing".into()));
    }

    #[test]
    fn test_empty_range_rejected() {
        let err = sample().with_iin_range(9, 1, "Mastercard").build().unwrap_err();
        assert_eq!(err, RegistryError::EmptyRange { start: 9, end: 1 });
    }

    #[test]
    fn test_major_industry_checks() {
        let err = InMemoryRegistry::builder()
            .with_major_industry(10, "Nope")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::InvalidMiiDigit(10));

        let err = InMemoryRegistry::builder()
            .with_major_industry(4, "A")
            .with_major_industry(4, "B")
            .build()
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateMajorIndustry(4));
    }

    #[test]
    fn test_issuer_without_iins() {
        let registry = InMemoryRegistry::builder()
            .with_issuer("Dormant", [16])
            .build()
            .unwrap();
        let dormant = registry.find_issuer("Dormant").unwrap();
        assert!(registry.iins_for_issuer(dormant).is_empty());
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryRegistry>();
    }
}
