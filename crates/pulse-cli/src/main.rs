//! Pulse CLI - cash-flow forecasting from a dashboard snapshot
//!
//! Usage:
//!   pulse forecast --snapshot state.json     Project the balance month by month
//!   pulse alerts --snapshot state.json       Show low cash, spike and surplus alerts
//!   pulse summary --snapshot state.json      Runway and headline figures
//!   pulse config                             Show the active engine settings

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Forecast {
            snapshot,
            months,
            threshold,
            as_of,
            json,
        } => {
            let engine = commands::load_engine(cli.config.as_deref())?;
            let mut inputs = commands::load_snapshot(&snapshot)?;
            commands::apply_overrides(&mut inputs, months, threshold);
            let as_of = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_forecast(&engine, &inputs, as_of, json)
        }
        Commands::Alerts {
            snapshot,
            dismiss,
            all,
            as_of,
            json,
        } => {
            let engine = commands::load_engine(cli.config.as_deref())?;
            let inputs = commands::load_snapshot(&snapshot)?;
            let as_of = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_alerts(&engine, &inputs, as_of, &dismiss, all, json)
        }
        Commands::Summary {
            snapshot,
            as_of,
            json,
        } => {
            let engine = commands::load_engine(cli.config.as_deref())?;
            let inputs = commands::load_snapshot(&snapshot)?;
            let as_of = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_summary(&engine, &inputs, as_of, json)
        }
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}
