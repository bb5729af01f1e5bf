//! Component configuration: the raw attribute bag and its typed form.
//!
//! The host hands over configuration as an untyped JSON object. Numbers may
//! arrive as doubles, so integral floats are accepted and fractional values
//! truncate toward zero. [`validate`] is pure and reports every problem it
//! finds; [`GeneratorConfig::from_attributes`] validates and then applies
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::width::IntWidth;

/// The untyped attribute bag supplied by the host.
pub type Attributes = Map<String, Value>;

/// Registry model triple for this component.
pub const MODEL: &str = "hunter:randint-generator:sensor";

/// Batch size used by `generate_batch` when the caller gives none.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Largest accepted channel count, whether given as `num_readings` or as
/// the length of `reading_names`.
pub const MAX_READINGS: usize = 1024;

/// Largest accepted `generate_batch` size.
pub const MAX_BATCH_SIZE: usize = 100_000;

/// Largest number of values one batch may draw (`size * num_readings`).
pub const MAX_BATCH_VALUES: usize = 1_000_000;

const DEFAULT_LOW: i128 = 0;
const DEFAULT_HIGH: i128 = 100;

/// Typed generator configuration.
///
/// `reading_names.len() == num_readings` and `low < high` hold for every
/// value built through [`GeneratorConfig::from_attributes`] or `default()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Inclusive lower bound.
    pub low: i128,
    /// Exclusive upper bound.
    pub high: i128,
    /// Number of channels produced per reading.
    pub num_readings: usize,
    /// One name per channel, in output order.
    pub reading_names: Vec<String>,
    /// Width that generated values must fit.
    pub int_width: IntWidth,
    /// Seed last applied through configuration or `reseed`.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            num_readings: 1,
            reading_names: default_reading_names(1),
            int_width: IntWidth::default(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Validates `attrs` and builds a full configuration, filling defaults.
    ///
    /// When `reading_names` is given without `num_readings`, the channel
    /// count follows the names.
    ///
    /// # Errors
    ///
    /// Returns every problem [`validate`] reports.
    pub fn from_attributes(attrs: &Attributes) -> Result<Self, ConfigError> {
        let fields = checked_fields(attrs)?;

        let num_readings = match (fields.num_readings, &fields.reading_names) {
            (Some(n), _) => usize::try_from(n).map_err(|_| readings_too_large(n))?,
            (None, Some(names)) => names.len(),
            (None, None) => 1,
        };
        let reading_names =
            fields.reading_names.unwrap_or_else(|| default_reading_names(num_readings));
        let low = fields.low.unwrap_or(DEFAULT_LOW);
        let high = fields.high.unwrap_or(DEFAULT_HIGH);
        // Only one bound given: the pair can still be inverted against the default.
        if low >= high {
            return Err(ConfigError::BoundsOrder { low, high });
        }

        Ok(Self {
            low,
            high,
            num_readings,
            reading_names,
            int_width: fields.int_width.unwrap_or_default(),
            seed: fields.seed,
        })
    }

    /// Current configuration as reported by `get_config`.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        serde_json::json!({
            "low": json_int(self.low),
            "high": json_int(self.high),
            "num_readings": self.num_readings,
            "reading_names": self.reading_names,
            "dtype": self.int_width.tag(),
            "seed": self.seed,
        })
    }
}

/// Names used when the configuration gives none: `value`, or `value_1..value_N`.
#[must_use]
pub fn default_reading_names(num_readings: usize) -> Vec<String> {
    if num_readings == 1 {
        vec!["value".to_string()]
    } else {
        (1..=num_readings).map(|i| format!("value_{i}")).collect()
    }
}

/// Checks an attribute bag without applying it.
///
/// # Errors
///
/// Returns a [`ConfigError`] describing every problem found; several
/// problems are wrapped in [`ConfigError::Multiple`].
pub fn validate(attrs: &Attributes) -> Result<(), ConfigError> {
    checked_fields(attrs).map(|_| ())
}

/// Attribute values that parsed, before defaults.
#[derive(Debug, Default)]
struct Fields {
    low: Option<i128>,
    high: Option<i128>,
    num_readings: Option<i128>,
    reading_names: Option<Vec<String>>,
    int_width: Option<IntWidth>,
    seed: Option<u64>,
}

fn checked_fields(attrs: &Attributes) -> Result<Fields, ConfigError> {
    let mut errors = Vec::new();
    let mut fields = Fields {
        low: optional_int(attrs, "low", &mut errors),
        high: optional_int(attrs, "high", &mut errors),
        num_readings: optional_int(attrs, "num_readings", &mut errors),
        ..Fields::default()
    };

    if let Some(value) = attrs.get("reading_names") {
        match string_list("reading_names", value) {
            Ok(names) if names.is_empty() => errors.push(ConfigError::EmptyReadingNames),
            Ok(names) if names.len() > MAX_READINGS => {
                errors.push(ConfigError::TooLarge {
                    key: "reading_names",
                    value: format!("{} names", names.len()),
                    max: MAX_READINGS,
                });
            }
            Ok(names) => fields.reading_names = Some(names),
            Err(e) => errors.push(e),
        }
    }
    if let Some(value) = attrs.get("dtype") {
        match value.as_str() {
            Some(tag) => match tag.parse() {
                Ok(width) => fields.int_width = Some(width),
                Err(e) => errors.push(e),
            },
            None => errors.push(ConfigError::InvalidDtype(value.to_string())),
        }
    }
    if let Some(value) = attrs.get("seed") {
        match parse_seed(value) {
            Ok(seed) => fields.seed = Some(seed),
            Err(e) => errors.push(e),
        }
    }

    if let Some(n) = fields.num_readings {
        if n < 1 {
            errors.push(ConfigError::NonPositiveReadings(n));
        } else if usize::try_from(n).map_or(true, |n| n > MAX_READINGS) {
            errors.push(readings_too_large(n));
        } else if let Some(names) = &fields.reading_names {
            if i128::try_from(names.len()).map_or(true, |len| len != n) {
                errors.push(ConfigError::ReadingNamesMismatch { names: names.len(), num_readings: n });
            }
        }
    }
    if let (Some(low), Some(high)) = (fields.low, fields.high) {
        if low >= high {
            errors.push(ConfigError::BoundsOrder { low, high });
        }
    }

    match ConfigError::from_all(errors) {
        Some(err) => Err(err),
        None => Ok(fields),
    }
}

fn readings_too_large(n: i128) -> ConfigError {
    ConfigError::TooLarge { key: "num_readings", value: n.to_string(), max: MAX_READINGS }
}

fn optional_int(attrs: &Attributes, key: &str, errors: &mut Vec<ConfigError>) -> Option<i128> {
    match integer(key, attrs.get(key)?) {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

/// Reads a JSON number as an integer, truncating fractional doubles.
///
/// # Errors
///
/// Returns [`ConfigError::WrongType`] for non-numeric or non-finite values.
#[allow(clippy::cast_possible_truncation)]
pub fn integer(key: &str, value: &Value) -> Result<i128, ConfigError> {
    let wrong_type = || ConfigError::WrongType {
        key: key.to_string(),
        expected: "an integer",
        found: value.to_string(),
    };
    let Value::Number(number) = value else {
        return Err(wrong_type());
    };
    if let Some(i) = number.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = number.as_u64() {
        return Ok(u.into());
    }
    match number.as_f64() {
        Some(f) if f.is_finite() => Ok(f.trunc() as i128),
        _ => Err(wrong_type()),
    }
}

/// Reads a seed value: a non-negative integer that fits in 64 bits.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSeed`] for anything else.
pub fn parse_seed(value: &Value) -> Result<u64, ConfigError> {
    integer("seed", value)
        .ok()
        .and_then(|seed| u64::try_from(seed).ok())
        .ok_or_else(|| ConfigError::InvalidSeed(value.to_string()))
}

/// Reads an optional batch size, defaulting to [`DEFAULT_BATCH_SIZE`].
///
/// # Errors
///
/// Returns [`ConfigError::NonPositiveSize`] for non-numeric or non-positive
/// sizes, and [`ConfigError::TooLarge`] above [`MAX_BATCH_SIZE`].
pub fn parse_batch_size(value: Option<&Value>) -> Result<usize, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_BATCH_SIZE);
    };
    let size = integer("size", value)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ConfigError::NonPositiveSize(value.to_string()))?;
    usize::try_from(size).ok().filter(|size| *size <= MAX_BATCH_SIZE).ok_or_else(|| {
        ConfigError::TooLarge { key: "size", value: value.to_string(), max: MAX_BATCH_SIZE }
    })
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>, ConfigError> {
    let wrong_type = || ConfigError::WrongType {
        key: key.to_string(),
        expected: "a list of strings",
        found: value.to_string(),
    };
    value
        .as_array()
        .ok_or_else(wrong_type)?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(wrong_type))
        .collect()
}

/// Encodes an integer as a JSON number, using a double only when it fits
/// neither `i64` nor `u64`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn json_int(value: i128) -> Value {
    if let Ok(i) = i64::try_from(value) {
        Value::from(i)
    } else if let Ok(u) = u64::try_from(value) {
        Value::from(u)
    } else {
        Value::from(value as f64)
    }
}

/// Host-side component configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Resource name assigned by the host.
    pub name: String,
    /// Registry model triple.
    #[serde(default = "default_model")]
    pub model: String,
    /// Raw attribute bag.
    #[serde(default)]
    pub attributes: Attributes,
}

fn default_model() -> String {
    MODEL.to_string()
}

impl ComponentConfig {
    /// A configuration with the given name and no attributes.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), model: default_model(), attributes: Attributes::new() }
    }

    /// Loads a configuration file. `.yaml`/`.yml` files are read as YAML,
    /// everything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            serde_yaml::from_str(&content)
                .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))
        }
    }
}
