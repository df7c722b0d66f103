//! Card generator.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::outcome::{Generation, GenerationFailure};
use crate::core::{luhn, CardRng, DigitSequence};
use crate::registry::IssuerRegistry;

/// Generates random valid card numbers for named issuers.
///
/// Randomness is injected per call, so a seeded `CardRng` makes output
/// reproducible.
///
/// ## Example
///
/// ```
/// use rust_pan::classify::CardClassifier;
/// use rust_pan::core::CardRng;
/// use rust_pan::generate::CardGenerator;
/// use rust_pan::registry::well_known;
///
/// let registry = well_known();
/// let generator = CardGenerator::new(&registry);
/// let classifier = CardClassifier::new(&registry);
///
/// let mut rng = CardRng::new(42);
/// let generated = generator.generate("Visa", &mut rng);
/// let card = generated.card_number().unwrap();
///
/// let details = classifier.classify(card).details().cloned().unwrap();
/// assert_eq!(details.issuing_network, "Visa");
/// ```
#[derive(Clone, Debug)]
pub struct CardGenerator<R> {
    registry: R,
}

impl<R: IssuerRegistry> CardGenerator<R> {
    /// Create a generator over a registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// The registry this generator reads.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Generate a card number for the issuer with exactly this network name.
    ///
    /// The IIN and the length are each drawn uniformly from the issuer's
    /// records; the digits in between are independent uniform draws.
    pub fn generate(&self, issuer_name: &str, rng: &mut CardRng) -> Generation {
        let failed = Generation::Failed {
            reason: GenerationFailure::IssuerUnrecognized,
        };

        let Some(issuer) = self.registry.find_issuer(issuer_name) else {
            debug!(issuer = issuer_name, "generation for unknown issuer");
            return failed;
        };

        let iins = self.registry.iins_for_issuer(issuer);
        let Some(iin) = rng.choose(&iins) else {
            warn!(issuer = issuer_name, "issuer has no IIN records");
            return failed;
        };

        let mut card = match DigitSequence::parse(&iin.prefix) {
            Ok(prefix) => prefix,
            Err(e) => {
                warn!(issuer = issuer_name, prefix = %iin.prefix, error = %e, "malformed IIN record");
                return failed;
            }
        };

        // Only lengths with room for the check digit after this prefix.
        let lengths: SmallVec<[usize; 8]> = issuer
            .valid_lengths
            .iter()
            .map(|&l| usize::from(l))
            .filter(|&l| l > card.len())
            .collect();
        let Some(&length) = rng.choose(&lengths) else {
            warn!(issuer = issuer_name, prefix = %iin.prefix, "no length fits IIN prefix");
            return failed;
        };

        while card.len() < length - 1 {
            card.push(rng.digit());
        }
        card.push(luhn::compute_check_digit(card.digits()));

        debug!(issuer = issuer_name, length, seed = rng.seed(), "generated card number");
        Generation::Generated { card_number: card }
    }
}
