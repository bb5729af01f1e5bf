//! Fake sensor component that reports random integers.
//!
//! The [`resource::RandintSensor`] implements the host plugin contract on top
//! of a [`generator::Generator`]. The `randint-sensor` binary drives one
//! sensor locally.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod ports;
pub mod resource;
pub mod width;

use clap::Parser;

pub use config::{Attributes, ComponentConfig, GeneratorConfig, MODEL};
pub use error::{ConfigError, GenerationError, SensorError};
pub use generator::{Batch, Generator, Readings};
pub use resource::{RandintSensor, Sensor};
pub use width::IntWidth;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}
