//! Issuer registry: the reference data classification and generation read.
//!
//! ## Key Types
//!
//! - `IssuerRegistry`: read interface the classifier and generator consume
//! - `InMemoryRegistry`: hash-indexed implementation, built and validated
//!   through `RegistryBuilder`
//! - `RegistrySnapshot`: JSON-loadable registry description
//! - `well_known()`: built-in table of common payment networks
//!
//! ## Prefix Ambiguity
//!
//! Lookups try prefixes from one digit up to six and stop at the first
//! hit. If a registry held both `4` and `4026`, every `4026...` number
//! would resolve to whichever issuer owns `4`. `RegistryBuilder::build`
//! refuses such data; other implementations are responsible for their own.

pub mod memory;
pub mod records;
pub mod snapshot;
pub mod well_known;

use std::sync::Arc;

pub use memory::{InMemoryRegistry, RegistryBuilder};
pub use records::{Iin, Issuer, LengthSet, MajorIndustry};
pub use snapshot::{IinEntry, IinRange, IssuerEntry, LengthSpec, RegistrySnapshot};
pub use well_known::well_known;

/// Read interface over issuer reference data.
///
/// Implementations may sit on a hash map, an embedded database, or a
/// remote service. The core only ever reads, so an implementation that
/// is `Sync` can back classifiers on many threads at once.
pub trait IssuerRegistry {
    /// Issuer owning exactly this prefix (1-6 digits), if any.
    fn find_iin(&self, prefix: &str) -> Option<&Issuer>;

    /// Issuer with exactly this network name, if any.
    fn find_issuer(&self, name: &str) -> Option<&Issuer>;

    /// Major industry row for a leading digit, if registered.
    fn major_industry(&self, digit: u8) -> Option<&MajorIndustry>;

    /// Every IIN record owned by `issuer`.
    ///
    /// Order must be stable between calls so that seeded generation is
    /// reproducible.
    fn iins_for_issuer(&self, issuer: &Issuer) -> Vec<&Iin>;
}

impl<R: IssuerRegistry + ?Sized> IssuerRegistry for &R {
    fn find_iin(&self, prefix: &str) -> Option<&Issuer> {
        (**self).find_iin(prefix)
    }

    fn find_issuer(&self, name: &str) -> Option<&Issuer> {
        (**self).find_issuer(name)
    }

    fn major_industry(&self, digit: u8) -> Option<&MajorIndustry> {
        (**self).major_industry(digit)
    }

    fn iins_for_issuer(&self, issuer: &Issuer) -> Vec<&Iin> {
        (**self).iins_for_issuer(issuer)
    }
}

impl<R: IssuerRegistry + ?Sized> IssuerRegistry for Box<R> {
    fn find_iin(&self, prefix: &str) -> Option<&Issuer> {
        (**self).find_iin(prefix)
    }

    fn find_issuer(&self, name: &str) -> Option<&Issuer> {
        (**self).find_issuer(name)
    }

    fn major_industry(&self, digit: u8) -> Option<&MajorIndustry> {
        (**self).major_industry(digit)
    }

    fn iins_for_issuer(&self, issuer: &Issuer) -> Vec<&Iin> {
        (**self).iins_for_issuer(issuer)
    }
}

impl<R: IssuerRegistry + ?Sized> IssuerRegistry for Arc<R> {
    fn find_iin(&self, prefix: &str) -> Option<&Issuer> {
        (**self).find_iin(prefix)
    }

    fn find_issuer(&self, name: &str) -> Option<&Issuer> {
        (**self).find_issuer(name)
    }

    fn major_industry(&self, digit: u8) -> Option<&MajorIndustry> {
        (**self).major_industry(digit)
    }

    fn iins_for_issuer(&self, issuer: &Issuer) -> Vec<&Iin> {
        (**self).iins_for_issuer(issuer)
    }
}
