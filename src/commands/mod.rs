//! Command dispatch and handlers.

pub mod do_command;
pub mod readings;
pub mod serve;
pub mod validate;

use std::path::Path;

use crate::cli::Command;
use crate::config::ComponentConfig;
use crate::resource::RandintSensor;

/// Name given to the sensor when no configuration file is supplied.
pub const DEFAULT_SENSOR_NAME: &str = "randint";

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Validate { config } => validate::run(config),
        Command::Readings { config, count } => readings::run(config.as_deref(), *count),
        Command::DoCommand { config, payload } => do_command::run(config.as_deref(), payload),
        Command::Serve { config } => serve::run(config.as_deref()),
    }
}

/// Load the component configuration, or the default one when no path is given.
fn load_config(path: Option<&Path>) -> Result<ComponentConfig, String> {
    path.map_or_else(|| Ok(ComponentConfig::named(DEFAULT_SENSOR_NAME)), ComponentConfig::load)
}

/// Construct a live sensor from an optional configuration file.
fn build_sensor(path: Option<&Path>) -> Result<RandintSensor, String> {
    let config = load_config(path)?;
    RandintSensor::new(&config).map_err(|e| e.to_string())
}
