//! Generation outcomes.

use serde::{Deserialize, Serialize};

use crate::core::DigitSequence;

/// Why no card number could be generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationFailure {
    /// No issuer by that name, or it has nothing to generate from.
    IssuerUnrecognized,
}

impl GenerationFailure {
    /// Message reported to callers.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            GenerationFailure::IssuerUnrecognized => "Card issuer is not recognized",
        }
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of one generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Generation {
    /// A fresh, valid card number.
    Generated {
        /// The generated number.
        card_number: DigitSequence,
    },
    /// Nothing could be generated.
    Failed {
        /// Why.
        reason: GenerationFailure,
    },
}

impl Generation {
    /// The generated number, if any.
    #[must_use]
    pub fn card_number(&self) -> Option<&DigitSequence> {
        match self {
            Generation::Generated { card_number } => Some(card_number),
            Generation::Failed { .. } => None,
        }
    }

    /// Check if a number was generated.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        matches!(self, Generation::Generated { .. })
    }
}
