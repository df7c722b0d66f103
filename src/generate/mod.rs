//! Card number generation.
//!
//! Synthesizes a random number for a named issuer: one of its IIN
//! prefixes, random digits up to one of its accepted lengths, and the
//! Luhn check digit. Every generated number classifies as valid for
//! that issuer.

pub mod generator;
pub mod outcome;

pub use generator::CardGenerator;
pub use outcome::{Generation, GenerationFailure};
