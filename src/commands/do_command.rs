//! `randint-sensor command` subcommand.

use std::path::Path;

use serde_json::{Map, Value};

use crate::resource::Sensor;

/// Execute a generic command given as a JSON object.
///
/// # Errors
///
/// Returns an error string if the payload is not a JSON object or the
/// command fails.
pub fn run(config: Option<&Path>, payload: &str) -> Result<(), String> {
    let command = parse_payload(payload)?;
    let sensor = super::build_sensor(config)?;
    let response = sensor.do_command(&command).map_err(|e| e.to_string())?;
    println!("{response}");
    Ok(())
}

fn parse_payload(payload: &str) -> Result<Map<String, Value>, String> {
    serde_json::from_str(payload).map_err(|e| format!("command must be a JSON object: {e}"))
}
