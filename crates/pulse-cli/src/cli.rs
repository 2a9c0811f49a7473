//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pulse - see where your cash is heading
#[derive(Parser)]
#[command(name = "pulse")]
#[command(about = "Cash-flow forecasting and alerts for founders", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to the data-dir override, then built-ins)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project the running balance month by month
    Forecast {
        /// Snapshot JSON with balance, income sources and expenses
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Override the snapshot's forecast horizon
        #[arg(short, long)]
        months: Option<i64>,

        /// Override the snapshot's low-cash threshold
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        as_of: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show alerts derived from the forecast
    Alerts {
        /// Snapshot JSON with balance, income sources and expenses
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Alert id already dismissed (repeatable)
        #[arg(short, long)]
        dismiss: Vec<String>,

        /// Include dismissed alerts
        #[arg(short, long)]
        all: bool,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        as_of: Option<String>,

        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Show runway and headline figures
    Summary {
        /// Snapshot JSON with balance, income sources and expenses
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long)]
        as_of: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the active engine settings and where they came from
    Config,
}
