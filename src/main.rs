#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args
)]

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use intakebot::channels;
use intakebot::config::Config;
use intakebot::hours::{Clock, SystemClock};
use intakebot::routing;
use intakebot::sessions::{InMemorySessionStore, SessionStore};

/// Conversational intake flows with human handoff.
#[derive(Parser, Debug)]
#[command(name = "intakebot")]
#[command(version)]
#[command(about = "Per-user conversational intake flows with human handoff.", long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive intake conversation on this terminal
    #[command(long_about = "\
Start an interactive intake conversation on this terminal.

Each line you type is handled as one inbound message from a single local
sender, against a fresh in-memory session store. Type /quit to exit.

Examples:
  intakebot chat
  intakebot chat --sender 551100001111")]
    Chat {
        /// Sender id to converse as (defaults to session.console_sender)
        #[arg(short, long)]
        sender: Option<String>,
    },
    /// Evaluate the attended-hours window
    Hours {
        /// RFC 3339 instant to evaluate instead of now (e.g. 2025-01-01T10:00:00Z)
        #[arg(long)]
        at: Option<String>,
    },
    /// Show version and configuration summary
    Status,
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Rewrite the config file with defaults
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(config_dir) = &cli.config_dir {
        if config_dir.trim().is_empty() {
            bail!("--config-dir cannot be empty");
        }
        std::env::set_var("INTAKEBOT_CONFIG_DIR", config_dir);
    }

    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = Config::load_or_init().await?;

    match cli.command {
        Commands::Chat { sender } => {
            let sender_id = sender.unwrap_or_else(|| config.session.console_sender.clone());
            if sender_id.trim().is_empty() {
                bail!("sender id cannot be empty");
            }

            let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
            let hours = config.hours.business_hours()?;
            let router = routing::create_router(
                store,
                config.templates.clone(),
                hours,
                Arc::new(SystemClock),
            );
            let channel = channels::create_console_channel();

            info!(sender = %sender_id, "starting console conversation");
            channels::run_console_loop(router.as_ref(), channel.as_ref(), &sender_id).await
        }

        Commands::Hours { at } => {
            let hours = config.hours.business_hours()?;
            let instant = match at {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .with_context(|| format!("'{raw}' is not an RFC 3339 timestamp"))?
                    .with_timezone(&Utc),
                None => SystemClock.now(),
            };

            let verdict = if hours.is_open_at(instant) { "open" } else { "closed" };
            println!(
                "{verdict} at {} (window: Mon-Fri {:02}:00-{:02}:00 {})",
                instant.with_timezone(&hours.timezone),
                hours.open_hour,
                hours.close_hour,
                hours.timezone
            );
            Ok(())
        }

        Commands::Status => {
            let hours = config.hours.business_hours()?;
            println!("intakebot {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Config:        {}", config.config_path.display());
            println!(
                "Hours:         Mon-Fri {:02}:00-{:02}:00 {}",
                hours.open_hour, hours.close_hour, hours.timezone
            );
            println!("Console as:    {}", config.session.console_sender);
            match config.session.idle_eviction_minutes {
                Some(minutes) => println!("Idle eviction: {minutes} min"),
                None => println!("Idle eviction: disabled"),
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config.config_path.display());
                Ok(())
            }
            ConfigAction::Init => {
                let fresh = Config {
                    config_path: config.config_path.clone(),
                    ..Config::default()
                };
                fresh.save().await?;
                println!("wrote defaults to {}", fresh.config_path.display());
                Ok(())
            }
        },
    }
}
