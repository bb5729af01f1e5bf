//! Host-facing sensor resource.
//!
//! The host constructs a resource from a [`ComponentConfig`], reconfigures
//! it when the configuration changes, and issues readings and commands.
//! Each call holds the instance lock for its whole duration, so a
//! reconfigure is an atomic replace and never interleaves with a draw.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use tracing::info;

use crate::adapters::live::LiveRandomSource;
use crate::config::{self, ComponentConfig};
use crate::error::{ConfigError, SensorError};
use crate::generator::{Generator, Geometry, Readings};
use crate::ports::RandomSource;

/// The host plugin contract for a sensor component.
pub trait Sensor: Send + Sync {
    /// Resource name assigned by the host.
    fn name(&self) -> &str;

    /// Applies a new configuration, replacing the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Config`] if the attributes do not validate.
    fn reconfigure(&self, config: &ComponentConfig) -> Result<(), SensorError>;

    /// Takes one reading.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Generation`] if drawing fails.
    fn readings(&self) -> Result<Readings, SensorError>;

    /// Runs a generic command.
    ///
    /// # Errors
    ///
    /// Returns an error for missing or bad parameters, unknown commands, or draw failures.
    fn do_command(&self, command: &Map<String, Value>) -> Result<Value, SensorError>;

    /// Shapes occupied by the component.
    fn geometries(&self) -> Vec<Geometry>;
}

/// Sensor that reports random integers.
pub struct RandintSensor<R: RandomSource = LiveRandomSource> {
    name: String,
    generator: Mutex<Generator<R>>,
}

impl RandintSensor {
    /// Constructs a sensor with a live random source and applies `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Config`] if the attributes do not validate.
    pub fn new(config: &ComponentConfig) -> Result<Self, SensorError> {
        Self::with_source(config, LiveRandomSource::new())
    }

    /// Checks a configuration before the host accepts it.
    ///
    /// Returns the names of required dependencies, which is always empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing every problem found.
    pub fn validate_config(config: &ComponentConfig) -> Result<Vec<String>, ConfigError> {
        config::validate(&config.attributes)?;
        Ok(Vec::new())
    }
}

impl<R: RandomSource> RandintSensor<R> {
    /// Constructs a sensor drawing from `source` and applies `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::Config`] if the attributes do not validate.
    pub fn with_source(config: &ComponentConfig, source: R) -> Result<Self, SensorError> {
        let sensor =
            Self { name: config.name.clone(), generator: Mutex::new(Generator::with_source(source)) };
        sensor.reconfigure(config)?;
        info!(name = %sensor.name, model = %config.model, "created sensor");
        Ok(sensor)
    }

    fn lock(&self) -> MutexGuard<'_, Generator<R>> {
        // configure swaps the whole config in one assignment; poisoning is safe to clear.
        self.generator.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: RandomSource> Sensor for RandintSensor<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn reconfigure(&self, config: &ComponentConfig) -> Result<(), SensorError> {
        self.lock().configure(&config.attributes)?;
        Ok(())
    }

    fn readings(&self) -> Result<Readings, SensorError> {
        Ok(self.lock().produce_reading()?)
    }

    fn do_command(&self, command: &Map<String, Value>) -> Result<Value, SensorError> {
        self.lock().handle_command(command)
    }

    fn geometries(&self) -> Vec<Geometry> {
        self.lock().geometries()
    }
}
