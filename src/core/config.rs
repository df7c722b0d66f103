//! Generator configuration.

use serde::{Deserialize, Serialize};

use super::CardRng;

/// Configuration for card number generation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Fixed seed for reproducible output.
    /// `None` draws a fresh seed from the thread RNG.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Create a new config with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the RNG this config describes.
    #[must_use]
    pub fn rng(&self) -> CardRng {
        match self.seed {
            Some(seed) => CardRng::new(seed),
            None => CardRng::from_entropy(),
        }
    }
}
