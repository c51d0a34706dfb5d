//! Review notifier CLI
//!
//! Command-line entry point for the homework review status bot.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use review_notifier::config::{check_tokens, missing_secrets};
use review_notifier::{load_settings, logging, Config, Secrets, Settings};
use tracing::Level;

#[derive(Parser)]
#[command(name = "review-notifier")]
#[command(about = "Forwards homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to a JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pause between polls, e.g. "10m" (overrides config file)
    #[arg(long, value_parser = humantime::parse_duration)]
    retry_period: Option<Duration>,

    /// Start the poll cursor this far in the past, e.g. "3weeks" (overrides config file)
    #[arg(long, value_parser = humantime::parse_duration)]
    lookback: Option<Duration>,

    /// Log level
    #[arg(short, long, default_value = "debug")]
    log_level: Level,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv = dotenvy::dotenv();

    logging::init(args.log_level);

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_period={:?}, lookback={:?}, log_level={:?}",
        args.config,
        args.retry_period,
        args.lookback,
        args.log_level
    );

    let env = |name: &str| std::env::var(name).ok();
    if !check_tokens(env) {
        tracing::error!(
            "CRITICAL: Missing required environment variables: {}",
            missing_secrets(env).join(", ")
        );
        std::process::exit(1);
    }
    let secrets = Secrets::from_env()?;

    let mut settings = if let Some(config_path) = &args.config {
        tracing::debug!("Loading settings from {:?}", config_path);
        load_settings(config_path)?
    } else {
        tracing::debug!("Using default settings");
        Settings::default()
    };

    if let Some(retry_period) = args.retry_period {
        settings.retry_period = retry_period;
    }
    if let Some(lookback) = args.lookback {
        settings.lookback = lookback;
    }

    tracing::info!("Starting review notifier");
    review_notifier::run(Config { secrets, settings }).await?;

    Ok(())
}
