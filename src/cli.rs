//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `randint-sensor`.
#[derive(Debug, Parser)]
#[command(name = "randint-sensor", version, about = "Drive a random integer sensor locally")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a component configuration file without applying it.
    Validate {
        /// Component configuration file (JSON or YAML).
        #[arg(long)]
        config: PathBuf,
    },
    /// Print readings as JSON, one object per line.
    Readings {
        /// Component configuration file (JSON or YAML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of readings to take.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Run a generic command and print the JSON response.
    #[command(name = "command")]
    DoCommand {
        /// Component configuration file (JSON or YAML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Command object, e.g. `{"command": "get_config"}`.
        payload: String,
    },
    /// Answer JSON requests from stdin, one per line.
    Serve {
        /// Component configuration file (JSON or YAML).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_validate_subcommand() {
        let cli = Cli::parse_from(["randint-sensor", "validate", "--config", "sensor.json"]);
        assert!(matches!(cli.command, Command::Validate { config } if config.ends_with("sensor.json")));
    }

    #[test]
    fn readings_count_defaults_to_one() {
        let cli = Cli::parse_from(["randint-sensor", "readings"]);
        assert!(matches!(cli.command, Command::Readings { config: None, count: 1 }));
    }

    #[test]
    fn parses_command_payload() {
        let cli = Cli::parse_from(["randint-sensor", "command", r#"{"command":"get_config"}"#]);
        let Command::DoCommand { payload, .. } = cli.command else {
            panic!("expected command subcommand");
        };
        assert!(payload.contains("get_config"));
    }

    #[test]
    fn validate_requires_config() {
        assert!(Cli::try_parse_from(["randint-sensor", "validate"]).is_err());
    }
}
