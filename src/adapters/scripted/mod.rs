//! Scripted adapters that return predetermined values. Test builds only.

pub mod rng;

pub use rng::ScriptedRandomSource;
