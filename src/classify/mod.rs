//! Card classification.
//!
//! Turns a digit sequence into either the card's ISO/IEC 7812 details or
//! the first reason it is invalid:
//!
//! 1. Luhn check digit
//! 2. Issuer, from the shortest registered IIN prefix (1-6 digits)
//! 3. Length, against the issuer's accepted lengths

pub mod classifier;
pub mod outcome;

pub use classifier::CardClassifier;
pub use outcome::{CardDetails, Classification, InvalidReason};
