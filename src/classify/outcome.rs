//! Classification outcomes.

use serde::{Deserialize, Serialize};

/// Why a well-formed card number was judged invalid.
///
/// Checked in declaration order; the first failure wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidReason {
    /// Luhn check digit does not match.
    CheckDigitInvalid,
    /// No IIN prefix of 1-6 digits is registered.
    IssuerUnrecognized,
    /// Issuer found, but it does not issue cards of this length.
    LengthInvalid,
}

impl InvalidReason {
    /// Message reported to callers.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            InvalidReason::CheckDigitInvalid => "Check digit is not valid",
            InvalidReason::IssuerUnrecognized => "Card issuer is not recognized",
            InvalidReason::LengthInvalid => "Card number length is not valid",
        }
    }
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything ISO/IEC 7812 lets us read off a valid card number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// Major Industry Identifier: the first digit.
    pub mii_digit: u8,

    /// Category registered for `mii_digit`; `None` if the registry has no row for it.
    pub issuer_category: Option<String>,

    /// Value of the first six digits, whatever length of prefix matched.
    pub iin: u32,

    /// Network name of the resolved issuer.
    pub issuing_network: String,

    /// Value of the digits between the IIN and the check digit (0 if none).
    pub account_number: u64,

    /// The trailing digit.
    pub check_digit: u8,
}

/// Result of classifying one card number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// All checks passed.
    Valid(CardDetails),
    /// A check failed.
    Invalid {
        /// The first check that failed.
        reason: InvalidReason,
    },
}

impl Classification {
    /// Check if the card number passed every check.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Classification::Valid(_))
    }

    /// Details, if valid.
    #[must_use]
    pub fn details(&self) -> Option<&CardDetails> {
        match self {
            Classification::Valid(details) => Some(details),
            Classification::Invalid { .. } => None,
        }
    }

    /// Failure reason, if invalid.
    #[must_use]
    pub fn reason(&self) -> Option<InvalidReason> {
        match self {
            Classification::Valid(_) => None,
            Classification::Invalid { reason } => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_messages() {
        assert_eq!(InvalidReason::CheckDigitInvalid.message(), "Check digit is not valid");
        assert_eq!(InvalidReason::IssuerUnrecognized.message(), "Card issuer is not recognized");
        assert_eq!(InvalidReason::LengthInvalid.to_string(), "Card number length is not valid");
    }

    #[test]
    fn test_accessors() {
        let invalid = Classification::Invalid {
            reason: InvalidReason::LengthInvalid,
        };
        assert!(!invalid.is_valid());
        assert_eq!(invalid.reason(), Some(InvalidReason::LengthInvalid));
        assert!(invalid.details().is_none());

        let valid = Classification::Valid(CardDetails {
            mii_digit: 4,
            issuer_category: None,
            iin: 411111,
            issuing_network: "Visa".into(),
            account_number: 111111111,
            check_digit: 1,
        });
        assert!(valid.is_valid());
        assert_eq!(valid.reason(), None);
        assert_eq!(valid.details().unwrap().issuing_network, "Visa");
    }
}
