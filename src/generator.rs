//! The random integer generator behind the sensor.
//!
//! A [`Generator`] owns its configuration and its random source. Readings
//! and batches are drawn from `[low, high)`, and the range must fit the
//! configured integer width.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info};

use crate::adapters::live::LiveRandomSource;
use crate::config::{self, json_int, Attributes, GeneratorConfig};
use crate::error::{ConfigError, GenerationError, SensorError};
use crate::ports::RandomSource;

/// Named values from one reading, in channel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readings(Vec<(String, i128)>);

impl Readings {
    /// Value of the first channel with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<i128> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Number of channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the reading has no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Channel names and values in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i128)> {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// The reading as a JSON object. A repeated name keeps its last value.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> =
            self.0.iter().map(|(name, value)| (name.clone(), json_int(*value))).collect();
        Value::Object(map)
    }
}

/// Result of `generate_batch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// One channel: a flat list of values.
    Single {
        /// Drawn values, one per row.
        values: Vec<i128>,
        /// Name of the only channel.
        reading_name: String,
    },
    /// Several channels: one reading per row.
    Multi {
        /// Drawn rows.
        rows: Vec<Readings>,
        /// Channel names.
        reading_names: Vec<String>,
    },
}

impl Batch {
    /// Number of rows.
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Single { values, .. } => values.len(),
            Self::Multi { rows, .. } => rows.len(),
        }
    }

    /// The batch payload returned to the caller.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Single { values, reading_name } => json!({
                "batch": values.iter().copied().map(json_int).collect::<Vec<_>>(),
                "batch_size": values.len(),
                "reading_name": reading_name,
            }),
            Self::Multi { rows, reading_names } => json!({
                "batch": rows.iter().map(Readings::to_json).collect::<Vec<_>>(),
                "batch_size": rows.len(),
                "reading_names": reading_names,
            }),
        }
    }
}

/// Element type of [`Generator::geometries`]. The host owns the real shape
/// type; this sensor never reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry;

/// Configurable random integer generator.
pub struct Generator<R: RandomSource = LiveRandomSource> {
    config: GeneratorConfig,
    source: R,
}

impl Generator {
    /// Creates a generator with default configuration and an entropy-seeded source.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(LiveRandomSource::new())
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Generator<R> {
    /// Creates a generator with default configuration drawing from `source`.
    pub fn with_source(source: R) -> Self {
        Self { config: GeneratorConfig::default(), source }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The random source, for inspection.
    #[must_use]
    pub fn source(&self) -> &R {
        &self.source
    }

    /// Replaces the configuration with the one described by `attrs`.
    ///
    /// Nothing changes if the attributes are invalid. A present `seed`
    /// reseeds the source; an absent one clears the stored seed but leaves
    /// the source's state as it was.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the attributes do not validate.
    pub fn configure(&mut self, attrs: &Attributes) -> Result<(), ConfigError> {
        let config = GeneratorConfig::from_attributes(attrs)?;
        if let Some(seed) = config.seed {
            self.source.reseed(seed);
        }
        info!(
            low = %config.low,
            high = %config.high,
            num_readings = config.num_readings,
            reading_names = ?config.reading_names,
            dtype = %config.int_width,
            seed = ?config.seed,
            "configured randint generator"
        );
        self.config = config;
        Ok(())
    }

    /// Reseeds the source and records the seed in the configuration.
    pub fn reseed(&mut self, seed: u64) {
        self.source.reseed(seed);
        self.config.seed = Some(seed);
        info!(seed, "reseeded random generator");
    }

    /// Draws one value per channel.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] if the bounds do not fit the width or
    /// the source fails.
    pub fn produce_reading(&mut self) -> Result<Readings, GenerationError> {
        let readings = self.draw_reading().inspect_err(|e| {
            error!(error = %e, "error generating random integers");
        })?;
        debug!(readings = %readings.to_json(), "generated readings");
        Ok(readings)
    }

    /// Draws `size` independent rows.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveSize`] for a zero size,
    /// [`ConfigError::TooLarge`] when the batch would exceed
    /// [`config::MAX_BATCH_SIZE`] rows or [`config::MAX_BATCH_VALUES`] values,
    /// or a [`GenerationError`] if any draw fails.
    pub fn produce_batch(&mut self, size: usize) -> Result<Batch, SensorError> {
        if size == 0 {
            return Err(ConfigError::NonPositiveSize(size.to_string()).into());
        }
        let max = config::MAX_BATCH_SIZE.min(config::MAX_BATCH_VALUES / self.config.num_readings);
        if size > max {
            return Err(ConfigError::TooLarge { key: "size", value: size.to_string(), max }.into());
        }
        let batch = self.draw_batch(size).inspect_err(|e| {
            error!(error = %e, size, "error generating random batch");
        })?;
        Ok(batch)
    }

    /// Runs a named command from the host's generic command call.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Config`] for a missing command name or bad
    /// parameters, [`SensorError::UnsupportedCommand`] for unknown names, and
    /// [`SensorError::Generation`] if `generate_batch` fails to draw.
    pub fn handle_command(&mut self, command: &Map<String, Value>) -> Result<Value, SensorError> {
        let name = match command.get("command") {
            None => return Err(ConfigError::MissingCommand.into()),
            Some(Value::String(name)) if name.is_empty() => {
                return Err(ConfigError::MissingCommand.into())
            }
            Some(Value::String(name)) => name.as_str(),
            Some(other) => {
                return Err(ConfigError::WrongType {
                    key: "command".to_string(),
                    expected: "a string",
                    found: other.to_string(),
                }
                .into())
            }
        };

        match name {
            "get_config" => Ok(self.config.snapshot()),
            "reseed" => {
                let value = command.get("seed").ok_or(ConfigError::MissingParam("seed"))?;
                let seed = config::parse_seed(value)?;
                self.reseed(seed);
                Ok(json!({ "status": "reseeded", "seed": seed }))
            }
            "generate_batch" => {
                let size = config::parse_batch_size(command.get("size"))?;
                Ok(self.produce_batch(size)?.to_json())
            }
            other => Err(SensorError::UnsupportedCommand(other.to_string())),
        }
    }

    /// Shapes occupied by this sensor: always none.
    #[must_use]
    pub fn geometries(&self) -> Vec<Geometry> {
        Vec::new()
    }

    fn draw_reading(&mut self) -> Result<Readings, GenerationError> {
        let values = self.draw_row()?;
        Ok(Readings(self.config.reading_names.iter().cloned().zip(values).collect()))
    }

    fn draw_batch(&mut self, size: usize) -> Result<Batch, GenerationError> {
        if self.config.num_readings == 1 {
            let values = (0..size)
                .map(|_| self.draw_one())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Batch::Single { values, reading_name: self.config.reading_names[0].clone() })
        } else {
            let rows = (0..size).map(|_| self.draw_reading()).collect::<Result<Vec<_>, _>>()?;
            Ok(Batch::Multi { rows, reading_names: self.config.reading_names.clone() })
        }
    }

    fn draw_row(&mut self) -> Result<Vec<i128>, GenerationError> {
        (0..self.config.num_readings).map(|_| self.draw_one()).collect()
    }

    fn draw_one(&mut self) -> Result<i128, GenerationError> {
        let GeneratorConfig { low, high, int_width, .. } = self.config;
        int_width.check_range(low, high)?;
        self.source.draw(low, high)
    }
}
