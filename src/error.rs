//! Error types surfaced by the sensor.

use thiserror::Error;

/// Bad or inconsistent configuration, or bad command parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `reading_names` does not have `num_readings` entries.
    #[error("reading_names length mismatch: {names} names for num_readings {num_readings}")]
    ReadingNamesMismatch {
        /// Number of names supplied.
        names: usize,
        /// Declared channel count.
        num_readings: i128,
    },
    /// `low` is not strictly below `high`.
    #[error("low must be less than high (low {low}, high {high})")]
    BoundsOrder {
        /// Inclusive lower bound.
        low: i128,
        /// Exclusive upper bound.
        high: i128,
    },
    /// `dtype` is not one of the supported width tags.
    #[error("invalid dtype {0:?}, expected one of int8, int16, int32, int64, uint8, uint16, uint32, uint64")]
    InvalidDtype(String),
    /// `num_readings` is zero or negative.
    #[error("num_readings must be positive, got {0}")]
    NonPositiveReadings(i128),
    /// `reading_names` is an empty list.
    #[error("reading_names must not be empty")]
    EmptyReadingNames,
    /// A seed that cannot seed the random source.
    #[error("seed must be a non-negative integer, got {0}")]
    InvalidSeed(String),
    /// Batch size is zero, negative, or not a number.
    #[error("size must be positive, got {0}")]
    NonPositiveSize(String),
    /// A channel count or batch size above its documented limit.
    #[error("{key} must be at most {max}, got {value}")]
    TooLarge {
        /// Attribute or parameter name.
        key: &'static str,
        /// The offending value as JSON.
        value: String,
        /// Largest accepted value.
        max: usize,
    },
    /// A required command parameter is absent.
    #[error("missing required parameter '{0}'")]
    MissingParam(&'static str),
    /// The command map has no `command` entry.
    #[error("missing command")]
    MissingCommand,
    /// An attribute or parameter has the wrong JSON type.
    #[error("{key} must be {expected}, got {found}")]
    WrongType {
        /// Attribute or parameter name.
        key: String,
        /// Human description of the accepted type.
        expected: &'static str,
        /// The offending value as JSON.
        found: String,
    },
    /// Several independent problems found by one validation pass.
    #[error("{}", join_messages(.0))]
    Multiple(Vec<ConfigError>),
}

fn join_messages(errors: &[ConfigError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

impl ConfigError {
    /// Collapses a list of problems into a single error, or `None` if the list is empty.
    #[must_use]
    pub fn from_all(mut errors: Vec<ConfigError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Multiple(errors)),
        }
    }
}

/// A failure while drawing random values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The configured bounds fall outside what the width can represent.
    #[error("{bound} {value} is out of bounds for {width}")]
    OutOfBounds {
        /// Which bound: `"low"` or `"high"`.
        bound: &'static str,
        /// The offending bound.
        value: i128,
        /// Width tag name.
        width: &'static str,
    },
    /// The range to draw from is empty.
    #[error("empty range [{low}, {high})")]
    EmptyRange {
        /// Inclusive lower bound.
        low: i128,
        /// Exclusive upper bound.
        high: i128,
    },
    /// The random source itself failed.
    #[error("random source failed: {0}")]
    Source(String),
}

/// Any failure returned from the sensor's host-facing calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// Invalid configuration or command parameters.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// The command name is not one this sensor implements.
    #[error("command '{0}' is not implemented")]
    UnsupportedCommand(String),
    /// Drawing random values failed.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl SensorError {
    /// Stable machine-readable category for this error.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::UnsupportedCommand(_) => "unsupported_command",
            Self::Generation(_) => "generation",
        }
    }
}
