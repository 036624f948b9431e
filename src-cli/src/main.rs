//! AICD command-line front end

mod cli;

use aicd_core::{Config, Detector};
use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use std::process::ExitCode;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    aicd_core::init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

/// Errors come back already turned into something a person can read
async fn run(cli: Cli) -> Result<(), String> {
    let detector = open_detector(&cli).map_err(|e| format!("{:#}", e))?;

    let payload = match cli.command {
        Command::Health => {
            let status = detector.check_connection().await;
            let connected = status.connected;
            print_json(&serde_json::to_value(&status).map_err(|e| e.to_string())?);
            return if connected {
                Ok(())
            } else {
                Err(status.message)
            };
        }
        Command::Detect { text, file, single } => match (text, file) {
            (_, Some(path)) => detector.analyze_file(&path, single).await,
            (Some(text), None) => detector.analyze_text(&text, single).await,
            // clap requires one of the two
            (None, None) => return Err("Either --text or --file is required".to_string()),
        },
        Command::History => detector.history().await,
        Command::Analysis { id } => detector.analysis(&id).await,
        Command::Session => detector.session_info().await,
        Command::ClearHistory => detector.clear_history().await,
        Command::SessionId => {
            match detector.session_id() {
                Some(token) => println!("{}", token),
                None => println!("No session yet"),
            }
            return Ok(());
        }
        Command::Logout => {
            detector.logout();
            println!("Session cleared");
            return Ok(());
        }
    };

    match payload {
        Ok(value) => {
            print_json(&value);
            Ok(())
        }
        Err(e) => {
            tracing::debug!("Command failed: {}", e);
            Err(e.user_message())
        }
    }
}

fn open_detector(cli: &Cli) -> anyhow::Result<Detector> {
    let config = Config::from_env().context("Invalid configuration")?;
    let config = resolve_config(cli, config)?;

    Detector::new(config).context("Failed to open local session storage")
}

/// Command-line flags win over the environment; validation runs on the result
fn resolve_config(cli: &Cli, config: Config) -> anyhow::Result<Config> {
    config
        .with_api_overrides(cli.api_url.clone(), cli.api_key.clone())
        .context("Invalid configuration")
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
