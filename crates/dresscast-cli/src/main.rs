//! Dresscast - daily weather and outfit report
//!
//! This binary coordinates:
//! - Hourly forecast fetching from Open-Meteo
//! - Sample caching in SQLite
//! - Outfit mapping and report rendering
//! - Mail delivery

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dresscast_cli::{location_from, thresholds_from, MailSettings, Pipeline};
use dresscast_config::AppConfig;
use dresscast_core::RuleTable;
use dresscast_fetch::{ForecastSource, OpenMeteoClient};
use dresscast_notify::{ConsoleNotifier, Notifier, SmtpNotifier};
use dresscast_store::SampleStore;

#[derive(Debug, Parser)]
#[command(name = "dresscast", version, about = "Daily weather and outfit report")]
struct Cli {
    /// Day to operate on (YYYY-MM-DD); defaults to today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the forecast and cache it
    Fetch,

    /// Print the report built from cached samples
    Report,

    /// Build the report from cached samples and mail it
    Send {
        /// Print the mail to stdout instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch, build, and mail in one go
    Run {
        /// Print the mail to stdout instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let mut pipeline = build_pipeline(&config)?;

    match cli.command {
        Command::Fetch => {
            let count = pipeline.fetch(date).await?;
            info!("Cached {} samples for {}", count, date);
        }
        Command::Report => {
            let text = pipeline.report(date)?;
            print!("{text}");
        }
        Command::Send { dry_run } => {
            let (notifier, recipient) = make_notifier(&config, dry_run)?;
            pipeline.send(date, notifier.as_ref(), &recipient).await?;
        }
        Command::Run { dry_run } => {
            let (notifier, recipient) = make_notifier(&config, dry_run)?;
            pipeline.run(date, notifier.as_ref(), &recipient).await?;
        }
    }

    Ok(())
}

/// Wire the forecast client, sample store, and rule table together
///
/// A rule table that fails validation stops the program here, before any
/// fetch or mail work happens.
fn build_pipeline(config: &AppConfig) -> Result<Pipeline> {
    let source =
        OpenMeteoClient::new(location_from(config)).context("Failed to build forecast client")?;
    let store = SampleStore::open(config.store_path()).context("Failed to open sample store")?;
    let rules = RuleTable::builtin().context("Invalid built-in rule table")?;
    Ok(Pipeline::new(
        Box::new(source) as Box<dyn ForecastSource>,
        store,
        thresholds_from(config),
        rules,
    ))
}

/// Pick the delivery channel and recipient
///
/// Dry runs print to stdout and need no credentials; real sends read them
/// from the environment.
fn make_notifier(config: &AppConfig, dry_run: bool) -> Result<(Box<dyn Notifier>, String)> {
    if dry_run {
        let recipient = std::env::var("RECIPIENT_EMAIL").unwrap_or_else(|_| "stdout".to_string());
        return Ok((Box::new(ConsoleNotifier), recipient));
    }
    let mail = MailSettings::from_env()?;
    let notifier = SmtpNotifier::new(&config.smtp_relay(), &mail.sender, &mail.app_password)
        .context("Failed to build SMTP transport")?;
    Ok((Box::new(notifier), mail.recipient))
}
