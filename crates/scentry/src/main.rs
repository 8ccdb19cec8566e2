// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scentry - VOC signature triage and signal routing.
//!
//! This is the binary entry point: classify a sensor reading from the
//! command line, or classify-and-route it to a configured recipient.

use clap::{Parser, Subcommand};
use scentry_config::ScentryConfig;
use scentry_core::ScentryError;
use scentry_router::{SignalRouter, SignatureClassifier};
use tracing_subscriber::EnvFilter;

/// Scentry - VOC signature triage and signal routing.
#[derive(Parser, Debug)]
#[command(name = "scentry", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify one sensor reading and print the diagnosis as JSON.
    Classify {
        /// Channel intensities of the reading, e.g. `0.88 0.45 0.12 0.09`.
        #[arg(required = true, num_args = 1..)]
        reading: Vec<f64>,
    },
    /// Classify and route one sensor reading, printing the routed packet as JSON.
    Route {
        /// Channel intensities of the reading.
        #[arg(required = true, num_args = 1..)]
        reading: Vec<f64>,
        /// Caller context entries as `key=value` pairs, echoed into the
        /// packet. Values parse as JSON where possible (`trust_score=0.99`
        /// stays a number), falling back to strings.
        #[arg(long = "context", value_name = "KEY=VALUE")]
        context: Vec<String>,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

fn main() {
    let cli = Cli::parse();

    let config = match scentry_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            scentry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);
    tracing::debug!(agent = config.agent.name.as_str(), "configuration loaded");

    if let Err(err) = run(cli.command, config) {
        eprintln!("scentry: {err}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: ScentryConfig) -> Result<(), ScentryError> {
    match command {
        Commands::Classify { reading } => {
            let classifier = SignatureClassifier::new(config.classifier);
            let diagnosis = classifier.classify(&reading);
            println!("{}", serde_json::to_string_pretty(&diagnosis)?);
        }
        Commands::Route { reading, context } => {
            let router = SignalRouter::new(config.classifier, config.routing);
            let context = parse_context(&context)?;
            let signal = router.route(&reading, &context)?;
            println!("{}", serde_json::to_string_pretty(&signal)?);
        }
        Commands::Config => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|err| ScentryError::Config(err.to_string()))?;
            print!("{rendered}");
        }
    }
    Ok(())
}

/// Build the caller context map from `key=value` CLI arguments.
///
/// Values are parsed as JSON first so numbers and booleans keep their
/// types; anything that fails to parse is kept as a plain string.
fn parse_context(
    pairs: &[String],
) -> Result<serde_json::Map<String, serde_json::Value>, ScentryError> {
    let mut context = serde_json::Map::new();
    for pair in pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            ScentryError::Config(format!("context entry `{pair}` is not of the form key=value"))
        })?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        context.insert(key.to_string(), value);
    }
    Ok(context)
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_values_keep_json_types() {
        let context = parse_context(&[
            "trust_score=0.99".to_string(),
            "id=ohio_user_01".to_string(),
            "verified=true".to_string(),
        ])
        .unwrap();
        assert_eq!(context["trust_score"], serde_json::json!(0.99));
        assert_eq!(context["id"], serde_json::json!("ohio_user_01"));
        assert_eq!(context["verified"], serde_json::json!(true));
    }

    #[test]
    fn malformed_context_entry_is_rejected() {
        let err = parse_context(&["no-equals-sign".to_string()]).unwrap_err();
        assert!(err.to_string().contains("key=value"));
    }

    #[test]
    fn route_command_produces_well_formed_packet() {
        let config = ScentryConfig::default();
        let router = SignalRouter::new(config.classifier, config.routing);
        let context = parse_context(&["trust_score=0.99".to_string()]).unwrap();

        let signal = router.route(&[0.88, 0.45, 0.12, 0.09], &context).unwrap();
        assert_eq!(signal.recipient, "SIERRA");
        assert_eq!(signal.context["trust_score"], serde_json::json!(0.99));

        let json = serde_json::to_value(&signal).unwrap();
        assert_eq!(json["diagnosis"]["status"], "POSITIVE_DETECTION");
    }

    #[test]
    fn cli_parses_reading_and_context() {
        let cli = Cli::try_parse_from([
            "scentry", "route", "0.1", "0.2", "0.3", "0.4",
            "--context", "trust_score=0.99",
            "--context", "id=ohio_user_01",
        ])
        .unwrap();
        match cli.command {
            Commands::Route { reading, context } => {
                assert_eq!(reading, vec![0.1, 0.2, 0.3, 0.4]);
                assert_eq!(context.len(), 2);
            }
            other => panic!("expected Route, got {other:?}"),
        }
    }
}
