// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Haven - an emotional-support chat service.
//!
//! This is the binary entry point for the Haven server and its operator
//! commands.

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use haven_config::model::HavenConfig;
use haven_config::ConfigError;
use haven_router::{ClassificationRequest, MessageRouter, RouteDecision};

/// Haven - an emotional-support chat service.
#[derive(Parser, Debug)]
#[command(name = "haven", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Classify a message and print the routing decision as JSON.
    Classify {
        /// The message to classify.
        message: String,
    },
    /// Inspect Haven configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the configuration and report problems.
    Check,
    /// Print the effective configuration with secrets redacted.
    Show,
}

const REDACTED: &str = "[REDACTED]";

fn load(path: Option<&PathBuf>) -> Result<HavenConfig, Vec<ConfigError>> {
    match path {
        Some(path) => haven_config::load_and_validate_path(path),
        None => haven_config::load_and_validate(),
    }
}

/// Routing decision for one message, as printed by `haven classify`.
fn classify_json(config: &HavenConfig, message: &str) -> serde_json::Value {
    let router = MessageRouter::new(config.routing.clone(), &config.openai);
    match router.route(&ClassificationRequest::new(message)) {
        RouteDecision::Canned(detection) => serde_json::json!({
            "route": "canned",
            "detection": detection,
        }),
        RouteDecision::PassThrough(params) => serde_json::json!({
            "route": "model",
            "model": params.model,
            "maxTokens": params.max_tokens,
            "temperature": params.temperature,
        }),
    }
}

fn redacted(config: &HavenConfig) -> HavenConfig {
    let mut config = config.clone();
    for secret in [
        &mut config.openai.api_key,
        &mut config.server.admin_token,
        &mut config.sheets.access_token,
    ] {
        if secret.is_some() {
            *secret = Some(REDACTED.to_string());
        }
    }
    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(errors) => {
            haven_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Classify { message }) => {
            let output = classify_json(&config, &message);
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Config {
            action: ConfigCommand::Check,
        }) => {
            println!(
                "haven: config ok (listening on {}:{}, model {})",
                config.server.host, config.server.port, config.openai.model
            );
        }
        Some(Commands::Config {
            action: ConfigCommand::Show,
        }) => match toml::to_string_pretty(&redacted(&config)) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("haven: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_loads_config_defaults() {
        let config = haven_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.persona.name, "Haven");
        assert_eq!(config.openai.model, "gpt-4o-mini");
    }

    #[test]
    fn cli_parses_classify_with_config_flag() {
        let cli = Cli::try_parse_from(["haven", "classify", "hello", "--config", "/tmp/h.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.toml")));
        assert!(matches!(cli.command, Some(Commands::Classify { ref message }) if message == "hello"));
    }

    #[test]
    fn cli_parses_config_subcommands() {
        let cli = Cli::try_parse_from(["haven", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommand::Show
            })
        ));
        assert!(Cli::try_parse_from(["haven", "config", "bogus"]).is_err());
    }

    #[test]
    fn classify_reports_canned_crisis() {
        let output = classify_json(&HavenConfig::default(), "I want to end my life");
        assert_eq!(output["route"], "canned");
        assert_eq!(output["detection"]["category"], "crisis");
        assert_eq!(output["detection"]["level"], "immediate");
    }

    #[test]
    fn classify_reports_model_route() {
        let output = classify_json(&HavenConfig::default(), "how was your day");
        assert_eq!(output["route"], "model");
        assert_eq!(output["model"], "gpt-4o-mini");
        assert_eq!(output["maxTokens"], 200);
    }

    #[test]
    fn redacted_hides_only_present_secrets() {
        let mut config = HavenConfig::default();
        config.openai.api_key = Some("sk-live".into());
        let shown = redacted(&config);
        assert_eq!(shown.openai.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.server.admin_token, None);
        assert_eq!(shown.sheets.access_token, None);
    }
}
