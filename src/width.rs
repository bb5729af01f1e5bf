//! Integer width tags and their representable ranges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GenerationError};

/// Bit width and signedness of generated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    /// Signed 8-bit.
    Int8,
    /// Signed 16-bit.
    Int16,
    /// Signed 32-bit.
    #[default]
    Int32,
    /// Signed 64-bit.
    Int64,
    /// Unsigned 8-bit.
    Uint8,
    /// Unsigned 16-bit.
    Uint16,
    /// Unsigned 32-bit.
    Uint32,
    /// Unsigned 64-bit.
    Uint64,
}

impl IntWidth {
    /// Every width, in tag order.
    pub const ALL: [IntWidth; 8] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
    ];

    /// The tag used in configuration (`"int32"`, `"uint8"`, ...).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
        }
    }

    /// Smallest representable value.
    #[must_use]
    pub fn min(self) -> i128 {
        match self {
            Self::Int8 => i8::MIN.into(),
            Self::Int16 => i16::MIN.into(),
            Self::Int32 => i32::MIN.into(),
            Self::Int64 => i64::MIN.into(),
            Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 => 0,
        }
    }

    /// Largest representable value.
    #[must_use]
    pub fn max(self) -> i128 {
        match self {
            Self::Int8 => i8::MAX.into(),
            Self::Int16 => i16::MAX.into(),
            Self::Int32 => i32::MAX.into(),
            Self::Int64 => i64::MAX.into(),
            Self::Uint8 => u8::MAX.into(),
            Self::Uint16 => u16::MAX.into(),
            Self::Uint32 => u32::MAX.into(),
            Self::Uint64 => u64::MAX.into(),
        }
    }

    /// Checks that every value of `[low, high)` fits this width.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyRange`] if `low >= high`, or
    /// [`GenerationError::OutOfBounds`] if either end lies outside the width.
    pub fn check_range(self, low: i128, high: i128) -> Result<(), GenerationError> {
        if low >= high {
            return Err(GenerationError::EmptyRange { low, high });
        }
        if low < self.min() {
            return Err(GenerationError::OutOfBounds { bound: "low", value: low, width: self.tag() });
        }
        // `high` is exclusive, so it may sit one past the maximum.
        if high > self.max() + 1 {
            return Err(GenerationError::OutOfBounds {
                bound: "high",
                value: high,
                width: self.tag(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for IntWidth {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|width| width.tag() == s)
            .ok_or_else(|| ConfigError::InvalidDtype(s.to_string()))
    }
}
