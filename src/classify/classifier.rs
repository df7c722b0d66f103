//! Card classifier: checksum, issuer resolution, length policy.

use tracing::debug;

use super::outcome::{CardDetails, Classification, InvalidReason};
use crate::core::{luhn, CardNumberInput, DigitSequence};
use crate::error::{FormatError, MAX_IIN_LENGTH};
use crate::registry::{Issuer, IssuerRegistry};

/// Classifies card numbers against an issuer registry.
///
/// Holds no state besides the registry, so one classifier can serve any
/// number of calls (and threads, if the registry is `Sync`).
///
/// ## Example
///
/// ```
/// use rust_pan::classify::{CardClassifier, InvalidReason};
/// use rust_pan::core::DigitSequence;
/// use rust_pan::registry::well_known;
///
/// let classifier = CardClassifier::new(well_known());
///
/// let card = DigitSequence::parse("5555555555554444").unwrap();
/// let details = classifier.classify(&card).details().cloned().unwrap();
/// assert_eq!(details.issuing_network, "Mastercard");
/// assert_eq!(details.iin, 555555);
///
/// let typo = DigitSequence::parse("5555555555554445").unwrap();
/// assert_eq!(classifier.classify(&typo).reason(), Some(InvalidReason::CheckDigitInvalid));
/// ```
#[derive(Clone, Debug)]
pub struct CardClassifier<R> {
    registry: R,
}

impl<R: IssuerRegistry> CardClassifier<R> {
    /// Create a classifier over a registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The registry this classifier reads.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Classify a card number.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// check digit, then issuer, then length.
    pub fn classify(&self, card: &DigitSequence) -> Classification {
        let outcome = self.run_checks(card);

        match &outcome {
            Classification::Valid(details) => {
                debug!(length = card.len(), network = %details.issuing_network, "card number valid");
            }
            Classification::Invalid { reason } => {
                debug!(length = card.len(), ?reason, "card number invalid");
            }
        }

        outcome
    }

    /// Parse boundary input, then classify it.
    ///
    /// Malformed input is an error, distinct from an invalid card number.
    pub fn classify_input(&self, input: impl Into<CardNumberInput>) -> Result<Classification, FormatError> {
        let card = input.into().into_digits()?;
        Ok(self.classify(&card))
    }

    fn run_checks(&self, card: &DigitSequence) -> Classification {
        let check_digit = luhn::compute_check_digit(card.payload());
        if check_digit != card.last() {
            return Classification::Invalid {
                reason: InvalidReason::CheckDigitInvalid,
            };
        }

        let Some(issuer) = self.resolve_issuer(card) else {
            return Classification::Invalid {
                reason: InvalidReason::IssuerUnrecognized,
            };
        };

        if !issuer.accepts_length(card.len()) {
            return Classification::Invalid {
                reason: InvalidReason::LengthInvalid,
            };
        }

        let mii_digit = card.first();
        Classification::Valid(CardDetails {
            mii_digit,
            issuer_category: self
                .registry
                .major_industry(mii_digit)
                .map(|row| row.issuer_category.clone()),
            iin: card.value_of(0..MAX_IIN_LENGTH) as u32,
            issuing_network: issuer.network_name.clone(),
            account_number: card.value_of(MAX_IIN_LENGTH..card.len() - 1),
            check_digit,
        })
    }

    /// Shortest registered prefix wins; at most six lookups.
    fn resolve_issuer(&self, card: &DigitSequence) -> Option<&Issuer> {
        (1..=MAX_IIN_LENGTH.min(card.len()))
            .find_map(|len| self.registry.find_iin(&card.prefix(len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{well_known, InMemoryRegistry};

    fn classify(number: &str) -> Classification {
        let classifier = CardClassifier::new(well_known());
        classifier.classify(&DigitSequence::parse(number).unwrap())
    }

    #[test]
    fn test_mastercard_details() {
        let details = classify("5555555555554444").details().cloned().unwrap();

        assert_eq!(details.mii_digit, 5);
        assert_eq!(details.issuer_category.as_deref(), Some("Banking and financial"));
        assert_eq!(details.iin, 555555);
        assert_eq!(details.issuing_network, "Mastercard");
        assert_eq!(details.account_number, 555555444);
        assert_eq!(details.check_digit, 4);
    }

    #[test]
    fn test_wrong_length_for_issuer() {
        // American Express prefix, correct check digit, 16 digits instead of 15
        assert_eq!(
            classify("3796169067397641").reason(),
            Some(InvalidReason::LengthInvalid)
        );
    }

    #[test]
    fn test_unrecognized_issuer() {
        // Diners Club 38 is not in the built-in table
        assert_eq!(
            classify("38225190345941").reason(),
            Some(InvalidReason::IssuerUnrecognized)
        );
    }

    #[test]
    fn test_bad_check_digit_reported_first() {
        // Unregistered prefix and wrong length too, but the check digit fails first
        assert_eq!(
            classify("38225190345942").reason(),
            Some(InvalidReason::CheckDigitInvalid)
        );
    }

    #[test]
    fn test_iin_uses_six_digits_for_short_match() {
        // Matches on "4" but reports the full six-digit window
        let details = classify("4111111111111111").details().cloned().unwrap();
        assert_eq!(details.issuing_network, "Visa");
        assert_eq!(details.iin, 411111);
        assert_eq!(details.account_number, 111111111);
    }

    #[test]
    fn test_missing_major_industry_row() {
        let registry = InMemoryRegistry::builder()
            .with_issuer("Visa", [16])
            .with_iin("4", "Visa")
            .build()
            .unwrap();
        let classifier = CardClassifier::new(&registry);

        let outcome = classifier.classify(&DigitSequence::parse("4111111111111111").unwrap());
        let details = outcome.details().unwrap();
        assert_eq!(details.issuer_category, None);
        assert_eq!(details.issuing_network, "Visa");
    }

    #[test]
    fn test_short_numbers() {
        let registry = InMemoryRegistry::builder()
            .with_issuer("Short", [3])
            .with_iin("4", "Short")
            .build()
            .unwrap();
        let classifier = CardClassifier::new(&registry);

        // 4, 2, check digit 2
        let details = classifier
            .classify(&DigitSequence::parse("422").unwrap())
            .details()
            .cloned()
            .unwrap();
        assert_eq!(details.iin, 422);
        assert_eq!(details.account_number, 0);
        assert_eq!(details.check_digit, 2);
    }

    #[test]
    fn test_single_digit_number() {
        // "0" passes the checksum but no prefix is registered
        assert_eq!(classify("0").reason(), Some(InvalidReason::IssuerUnrecognized));
    }

    #[test]
    fn test_classify_input() {
        let classifier = CardClassifier::new(well_known());

        let outcome = classifier.classify_input("5555 5555 5555 4444").unwrap();
        assert!(outcome.is_valid());

        let outcome = classifier.classify_input(5555555555554444u64).unwrap();
        assert!(outcome.is_valid());

        assert_eq!(classifier.classify_input("sdfsdfsd").unwrap_err(), FormatError::InvalidCharacter {
            position: 0,
            character: 's'
        });
        assert_eq!(classifier.classify_input("").unwrap_err(), FormatError::Empty);
    }
}
