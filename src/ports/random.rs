//! Random source port for drawing bounded integers.

use crate::error::GenerationError;

/// Produces uniformly distributed integers.
///
/// Abstracting the generator lets each sensor own its source and lets
/// tests substitute a scripted sequence for the live RNG.
pub trait RandomSource: Send {
    /// Replaces the internal state so the sequence is reproducible from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Draws one integer uniformly from `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is empty or the source cannot produce a value.
    fn draw(&mut self, low: i128, high: i128) -> Result<i128, GenerationError>;
}
