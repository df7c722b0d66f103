//! # rust-pan
//!
//! Payment card number classification and generation per ISO/IEC 7812.
//!
//! ## Design Principles
//!
//! 1. **Registry-Agnostic**: Issuer data sits behind the `IssuerRegistry`
//!    trait. The core never assumes how it is stored.
//!
//! 2. **Outcomes Are Data**: An invalid card or a failed generation is a
//!    value (`Classification`, `Generation`), not an error. Only malformed
//!    input and broken registry data produce `Err`.
//!
//! 3. **Stateless Core**: Classifiers and generators keep nothing between
//!    calls. Randomness is injected, so seeded generation is reproducible.
//!
//! ## Modules
//!
//! - `core`: Digit sequences, input parsing, Luhn checksum, RNG, configuration
//! - `registry`: Issuer registry trait, in-memory implementation, built-in table
//! - `classify`: Check digit, issuer and length validation
//! - `generate`: Random valid card numbers for a named issuer
//! - `response`: Serializable response shapes for transport layers

pub mod classify;
pub mod core;
pub mod error;
pub mod generate;
pub mod registry;
pub mod response;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{CardNumberInput, CardRng, DigitSequence, GeneratorConfig};

pub use crate::error::{Error, FormatError, RegistryError, Result};

pub use crate::registry::{
    well_known, InMemoryRegistry, Iin, Issuer, IssuerRegistry, MajorIndustry, RegistryBuilder,
    RegistrySnapshot,
};

pub use crate::classify::{CardClassifier, CardDetails, Classification, InvalidReason};

pub use crate::generate::{CardGenerator, Generation, GenerationFailure};

pub use crate::response::{GenerationResponse, ValidationResponse};
