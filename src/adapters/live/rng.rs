//! Live adapter for the `RandomSource` port.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GenerationError;
use crate::ports::RandomSource;

/// Random source backed by a per-instance [`StdRng`].
///
/// Starts from OS entropy; after [`RandomSource::reseed`] the sequence is
/// fully determined by the seed.
pub struct LiveRandomSource {
    rng: StdRng,
}

impl LiveRandomSource {
    /// Creates a source seeded from operating-system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: StdRng::from_os_rng() }
    }

    /// Creates a source with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for LiveRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for LiveRandomSource {
    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    fn draw(&mut self, low: i128, high: i128) -> Result<i128, GenerationError> {
        if low >= high {
            return Err(GenerationError::EmptyRange { low, high });
        }
        Ok(self.rng.random_range(low..high))
    }
}
