//! Core building blocks: digit sequences, the Luhn checksum, RNG, configuration.
//!
//! Nothing here depends on a registry. Classification and generation are
//! built on top in `classify` and `generate`.

pub mod config;
pub mod digits;
pub mod luhn;
pub mod rng;

pub use config::GeneratorConfig;
pub use digits::{CardNumberInput, DigitSequence};
pub use luhn::compute_check_digit;
pub use rng::CardRng;
