//! Error types.
//!
//! Only malformed input and broken registry data are errors. An invalid
//! card number or a failed generation is a normal outcome and is returned
//! as data (`Classification`, `Generation`), never as `Err`.

use thiserror::Error;

/// Largest card number length accepted anywhere in the crate (ISO/IEC 7812).
pub const MAX_PAN_LENGTH: usize = 19;

/// Longest IIN prefix a registry may hold.
pub const MAX_IIN_LENGTH: usize = 6;

/// Crate-level error.
#[derive(Error, Debug)]
pub enum Error {
    /// Card number could not be turned into digits.
    #[error("invalid card number format: {0}")]
    Format(#[from] FormatError),

    /// Registry data failed integrity validation.
    #[error("invalid registry: {0}")]
    Registry(#[from] RegistryError),

    /// Registry snapshot could not be decoded.
    #[error("registry snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used by fallible crate APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Input could not be parsed into a digit sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Nothing left after removing spaces.
    #[error("card number is empty")]
    Empty,

    /// A character other than `0-9` (or a space in text input).
    #[error("invalid character '{}' at position {position}", .character.escape_default())]
    InvalidCharacter {
        /// Position in the space-stripped text (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A digit value outside `0..=9` was supplied directly.
    #[error("digit value {value} at position {position} is out of range")]
    DigitOutOfRange {
        /// Position in the supplied slice.
        position: usize,
        /// The offending value.
        value: u8,
    },
}

/// Registry data-integrity failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two issuers share a network name.
    #[error("issuer '{0}' is registered twice")]
    DuplicateIssuer(String),

    /// Two IIN records share a prefix.
    #[error("IIN prefix '{0}' is registered twice")]
    DuplicateIin(String),

    /// An IIN names an issuer that does not exist.
    #[error("IIN prefix '{prefix}' references unknown issuer '{issuer}'")]
    UnknownIssuer {
        /// IIN prefix.
        prefix: String,
        /// Issuer name that could not be resolved.
        issuer: String,
    },

    /// A prefix is not 1-6 decimal digits.
    #[error("IIN prefix '{0}' must be 1 to 6 decimal digits")]
    InvalidPrefix(String),

    /// An inclusive IIN range has `start > end`.
    #[error("IIN range {start}..={end} is empty")]
    EmptyRange {
        /// Range start.
        start: u32,
        /// Range end.
        end: u32,
    },

    /// One prefix is a proper prefix of another, so lookup order would decide the issuer.
    #[error("IIN prefix '{shorter}' ({shorter_issuer}) shadows '{longer}' ({longer_issuer})")]
    AmbiguousPrefix {
        /// The shorter prefix.
        shorter: String,
        /// Issuer of the shorter prefix.
        shorter_issuer: String,
        /// The longer prefix it shadows.
        longer: String,
        /// Issuer of the longer prefix.
        longer_issuer: String,
    },

    /// An issuer has no accepted lengths.
    #[error("issuer '{0}' has no valid lengths")]
    NoLengths(String),

    /// An accepted length is outside `1..=19`, or malformed.
    #[error("issuer '{issuer}' has invalid length '{length}'")]
    InvalidLength {
        /// Issuer name.
        issuer: String,
        /// The offending length, as written.
        length: String,
    },

    /// An accepted length leaves no room for the check digit after one of the issuer's prefixes.
    #[error("issuer '{issuer}' length {length} is too short for IIN prefix '{prefix}'")]
    LengthTooShort {
        /// Issuer name.
        issuer: String,
        /// The offending length.
        length: u8,
        /// The prefix it cannot hold.
        prefix: String,
    },

    /// Major industry digit is outside `0..=9`.
    #[error("major industry digit {0} is out of range")]
    InvalidMiiDigit(u8),

    /// Two major industry rows share a digit.
    #[error("major industry digit {0} is registered twice")]
    DuplicateMajorIndustry(u8),
}
