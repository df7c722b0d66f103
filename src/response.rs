//! Transport-neutral response shapes.
//!
//! Field names and the omission of absent fields match the JSON the
//! validation and generation endpoints have always produced:
//!
//! ```
//! use rust_pan::classify::CardClassifier;
//! use rust_pan::core::DigitSequence;
//! use rust_pan::registry::well_known;
//! use rust_pan::response::ValidationResponse;
//!
//! let classifier = CardClassifier::new(well_known());
//! let card = DigitSequence::parse("5555555555554445").unwrap();
//! let response = ValidationResponse::from(classifier.classify(&card));
//!
//! assert_eq!(
//!     serde_json::to_string(&response).unwrap(),
//!     r#"{"is_valid":false,"reason":"Check digit is not valid"}"#
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::generate::Generation;

/// Outcome of a validation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Whether every check passed.
    pub is_valid: bool,

    /// Failure message, when invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Major Industry Identifier digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mii_digit: Option<u8>,

    /// Category of the MII digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_category: Option<String>,

    /// First six digits as an integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iin: Option<u32>,

    /// Issuer network name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuing_network: Option<String>,

    /// Account digits as an integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<u64>,

    /// Trailing check digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<u8>,
}

impl From<Classification> for ValidationResponse {
    fn from(outcome: Classification) -> Self {
        match outcome {
            Classification::Valid(details) => Self {
                is_valid: true,
                reason: None,
                mii_digit: Some(details.mii_digit),
                issuer_category: details.issuer_category,
                iin: Some(details.iin),
                issuing_network: Some(details.issuing_network),
                account_number: Some(details.account_number),
                check_digit: Some(details.check_digit),
            },
            Classification::Invalid { reason } => Self {
                is_valid: false,
                reason: Some(reason.message().to_string()),
                ..Self::default()
            },
        }
    }
}

/// Outcome of a generation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Whether a number was generated.
    pub generation_success: bool,

    /// The generated number as an integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<u64>,

    /// Failure message, when nothing was generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<Generation> for GenerationResponse {
    fn from(outcome: Generation) -> Self {
        match outcome {
            // Card numbers are at most 19 digits, which always fits a u64.
            Generation::Generated { card_number } => Self {
                generation_success: true,
                card_number: card_number.to_u64(),
                reason: None,
            },
            Generation::Failed { reason } => Self {
                generation_success: false,
                card_number: None,
                reason: Some(reason.message().to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{CardDetails, InvalidReason};
    use crate::core::DigitSequence;
    use crate::generate::GenerationFailure;
    use serde_json::json;

    #[test]
    fn test_valid_shape() {
        let response = ValidationResponse::from(Classification::Valid(CardDetails {
            mii_digit: 5,
            issuer_category: Some("Banking and financial".into()),
            iin: 555555,
            issuing_network: "Mastercard".into(),
            account_number: 555555444,
            check_digit: 4,
        }));

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "is_valid": true,
                "mii_digit": 5,
                "issuer_category": "Banking and financial",
                "iin": 555555,
                "issuing_network": "Mastercard",
                "account_number": 555555444,
                "check_digit": 4
            })
        );
    }

    #[test]
    fn test_invalid_shape() {
        let response = ValidationResponse::from(Classification::Invalid {
            reason: InvalidReason::LengthInvalid,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "is_valid": false, "reason": "Card number length is not valid" })
        );
    }

    #[test]
    fn test_generation_shapes() {
        let ok = GenerationResponse::from(Generation::Generated {
            card_number: DigitSequence::parse("4111111111111111").unwrap(),
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "generation_success": true, "card_number": 4111111111111111u64 })
        );

        let failed = GenerationResponse::from(Generation::Failed {
            reason: GenerationFailure::IssuerUnrecognized,
        });
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "generation_success": false, "reason": "Card issuer is not recognized" })
        );
    }
}
