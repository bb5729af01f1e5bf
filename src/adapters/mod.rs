//! Adapters implementing the port traits.

pub mod live;
#[cfg(test)]
pub mod scripted;
