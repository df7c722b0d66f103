//! Built-in table of ISO/IEC 7812 major industries and common networks.
//!
//! Only networks whose prefixes do not overlap are included: Visa owns
//! all of `4`, so Visa Electron's `4026` cannot be listed beside it, and
//! Diners Club is limited to `36` because its US/Canada cards share
//! Mastercard's `54`/`55`.

use super::memory::{InMemoryRegistry, RegistryBuilder};

const MAJOR_INDUSTRIES: [(u8, &str); 10] = [
    (0, "ISO/TC 68 and other industry assignments"),
    (1, "Airlines"),
    (2, "Airlines, financial and other future industry assignments"),
    (3, "Travel and entertainment"),
    (4, "Banking and financial"),
    (5, "Banking and financial"),
    (6, "Merchandising and banking/financial"),
    (7, "Petroleum and other future industry assignments"),
    (8, "Healthcare, telecommunications and other future industry assignments"),
    (9, "For assignment by national standards bodies"),
];

/// (network, accepted lengths, single prefixes, inclusive ranges)
type NetworkRow = (&'static str, &'static [u8], &'static [&'static str], &'static [(u32, u32)]);

const NETWORKS: &[NetworkRow] = &[
    ("American Express", &[15], &["34", "37"], &[]),
    ("Diners Club International", &[14, 15, 16, 17, 18, 19], &["36"], &[]),
    ("Discover", &[16, 17, 18, 19], &["6011", "65"], &[(644, 649)]),
    ("InstaPayment", &[16], &[], &[(637, 639)]),
    ("JCB", &[16, 17, 18, 19], &[], &[(3528, 3589)]),
    (
        "Maestro",
        &[12, 13, 14, 15, 16, 17, 18, 19],
        &["5018", "5020", "5038", "5893", "6304", "6759"],
        &[(6761, 6763)],
    ),
    ("Mastercard", &[16], &[], &[(51, 55), (2221, 2720)]),
    ("Mir", &[16, 17, 18, 19], &[], &[(2200, 2204)]),
    ("UnionPay", &[16, 17, 18, 19], &["62"], &[]),
    ("Visa", &[13, 16, 19], &["4"], &[]),
];

/// Builder pre-loaded with the built-in table, for extending it.
#[must_use]
pub fn well_known_builder() -> RegistryBuilder {
    let mut builder = InMemoryRegistry::builder();

    for (digit, category) in MAJOR_INDUSTRIES {
        builder = builder.with_major_industry(digit, category);
    }

    for &(name, lengths, prefixes, ranges) in NETWORKS {
        builder = builder.with_issuer(name, lengths.iter().copied());
        for &prefix in prefixes {
            builder = builder.with_iin(prefix, name);
        }
        for &(start, end) in ranges {
            builder = builder.with_iin_range(start, end, name);
        }
    }

    builder
}

/// Registry holding the built-in table.
///
/// ```
/// use rust_pan::registry::{well_known, IssuerRegistry};
///
/// let registry = well_known();
/// assert_eq!(registry.find_iin("37").unwrap().network_name, "American Express");
/// ```
#[must_use]
pub fn well_known() -> InMemoryRegistry {
    well_known_builder()
        .build()
        .expect("built-in issuer table is consistent")
}
