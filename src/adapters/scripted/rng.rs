//! Scripted adapter for the `RandomSource` port.

use std::collections::VecDeque;

use crate::error::GenerationError;
use crate::ports::RandomSource;

/// Returns a fixed sequence of values, in order.
///
/// A scripted value outside the requested range, or a draw after the script
/// runs out, is reported as a source failure. Reseeds are recorded so callers
/// can assert on them.
#[derive(Debug, Default)]
pub struct ScriptedRandomSource {
    values: VecDeque<i128>,
    reseeds: Vec<u64>,
}

impl ScriptedRandomSource {
    /// Creates a source that yields `values` one per draw.
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = i128>) -> Self {
        Self { values: values.into_iter().collect(), reseeds: Vec::new() }
    }

    /// Seeds passed to [`RandomSource::reseed`] so far.
    #[must_use]
    pub fn reseeds(&self) -> &[u64] {
        &self.reseeds
    }

    /// Number of scripted values not yet drawn.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandomSource {
    fn reseed(&mut self, seed: u64) {
        self.reseeds.push(seed);
    }

    fn draw(&mut self, low: i128, high: i128) -> Result<i128, GenerationError> {
        let value = self
            .values
            .pop_front()
            .ok_or_else(|| GenerationError::Source("scripted values exhausted".to_string()))?;
        if (low..high).contains(&value) {
            Ok(value)
        } else {
            Err(GenerationError::Source(format!("scripted value {value} outside [{low}, {high})")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_values_in_order() {
        let mut source = ScriptedRandomSource::new([3, 1, 2]);
        assert_eq!(source.draw(0, 10), Ok(3));
        assert_eq!(source.draw(0, 10), Ok(1));
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn exhausted_script_fails() {
        let mut source = ScriptedRandomSource::new([]);
        assert!(matches!(source.draw(0, 10), Err(GenerationError::Source(_))));
    }

    #[test]
    fn out_of_range_value_fails() {
        let mut source = ScriptedRandomSource::new([10]);
        assert!(source.draw(0, 10).is_err());
    }

    #[test]
    fn records_reseeds() {
        let mut source = ScriptedRandomSource::default();
        source.reseed(5);
        source.reseed(9);
        assert_eq!(source.reseeds(), &[5, 9]);
    }
}
