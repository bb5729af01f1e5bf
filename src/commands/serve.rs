//! `randint-sensor serve` command.
//!
//! Reads one JSON request per line and writes one JSON response per line.
//! Responses follow the `{"Ok": value}` / `{"Err": message}` convention.
//! A malformed line gets an `Err` response; the loop ends at EOF.

use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, warn};

use crate::config::{self, Attributes, ComponentConfig};
use crate::error::SensorError;
use crate::resource::Sensor;

/// A request to the sensor, tagged by `method`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Request {
    /// Take one reading.
    Readings,
    /// Run a generic command.
    DoCommand {
        /// Command object with a `command` key.
        command: Map<String, Value>,
    },
    /// Replace the configuration.
    Reconfigure {
        /// New attribute bag.
        #[serde(default)]
        attributes: Attributes,
    },
    /// Check an attribute bag without applying it.
    Validate {
        /// Attribute bag to check.
        #[serde(default)]
        attributes: Attributes,
    },
    /// List the sensor's shapes.
    Geometries,
}

/// Execute the `serve` command on stdin/stdout.
///
/// # Errors
///
/// Returns an error string if the sensor cannot be built, the runtime
/// cannot start, or stdin/stdout fail.
pub fn run(config: Option<&Path>) -> Result<(), String> {
    let sensor = super::build_sensor(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    let handled = runtime
        .block_on(async {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            serve_lines(&sensor, stdin, &mut stdout).await
        })
        .map_err(|e| format!("serve loop failed: {e}"))?;
    debug!(handled, "serve loop finished");
    Ok(())
}

/// Answers every request line from `reader` on `writer`, in order.
///
/// Blank lines are skipped. Returns the number of requests answered.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails.
pub async fn serve_lines<S, R, W>(sensor: &S, reader: R, writer: &mut W) -> std::io::Result<usize>
where
    S: Sensor + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut encoded = respond(sensor, &line).to_string();
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        handled += 1;
    }
    Ok(handled)
}

/// Builds the response for one request line.
pub fn respond<S: Sensor + ?Sized>(sensor: &S, line: &str) -> Value {
    let result = match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(sensor, request).map_err(|e| e.to_string()),
        Err(e) => Err(format!("malformed request: {e}")),
    };
    match result {
        Ok(value) => json!({ "Ok": value }),
        Err(message) => {
            warn!(error = %message, "request failed");
            json!({ "Err": message })
        }
    }
}

fn handle<S: Sensor + ?Sized>(sensor: &S, request: Request) -> Result<Value, SensorError> {
    match request {
        Request::Readings => Ok(sensor.readings()?.to_json()),
        Request::DoCommand { command } => sensor.do_command(&command),
        Request::Reconfigure { attributes } => {
            let config = ComponentConfig { attributes, ..ComponentConfig::named(sensor.name()) };
            sensor.reconfigure(&config)?;
            Ok(Value::Null)
        }
        Request::Validate { attributes } => {
            config::validate(&attributes)?;
            Ok(json!([]))
        }
        Request::Geometries => Ok(json!(sensor.geometries())),
    }
}
