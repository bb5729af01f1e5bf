//! Port traits defining external boundaries.
//!
//! Implementations live in `src/adapters/`.

pub mod random;

pub use random::RandomSource;
