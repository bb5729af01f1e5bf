//! `randint-sensor readings` command.

use std::path::Path;

use crate::resource::Sensor;

/// Execute the `readings` command, printing `count` readings.
///
/// # Errors
///
/// Returns an error string if the sensor cannot be built or a draw fails.
pub fn run(config: Option<&Path>, count: usize) -> Result<(), String> {
    let sensor = super::build_sensor(config)?;
    for _ in 0..count {
        let readings = sensor.readings().map_err(|e| e.to_string())?;
        println!("{}", readings.to_json());
    }
    Ok(())
}
