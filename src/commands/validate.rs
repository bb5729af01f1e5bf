//! `randint-sensor validate` command.

use std::path::Path;

use crate::config::ComponentConfig;
use crate::resource::RandintSensor;

/// Execute the `validate` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be loaded or does not validate.
pub fn run(path: &Path) -> Result<(), String> {
    let config = ComponentConfig::load(path)?;
    RandintSensor::validate_config(&config)
        .map_err(|e| format!("invalid configuration for {}: {e}", config.name))?;
    println!("ok");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn reports_invalid_bounds() {
        let dir = std::env::temp_dir()
            .join(format!("randint_validate_cmd_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, r#"{"name": "r", "attributes": {"low": 10, "high": 5}}"#).unwrap();

        let err = run(&path).unwrap_err();
        assert!(err.contains("low must be less than high"));

        let path = dir.join("good.json");
        std::fs::write(&path, r#"{"name": "r", "attributes": {"low": 5, "high": 10}}"#).unwrap();
        assert!(run(&path).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
