//! Live adapters backed by real randomness.

pub mod rng;

pub use rng::LiveRandomSource;
