//! Config command implementation

use std::path::Path;

use anyhow::{Context, Result};
use pulse_core::PulseConfig;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = PulseConfig::load(config_path).context("Failed to load config")?;

    println!();
    println!("⚙️  Pulse Config");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Source: {}", source);
    if let Some(path) = pulse_core::config::default_config_path() {
        println!("   Override location: {}", path.display());
    }
    println!();
    println!("   [forecast]");
    println!("   default_months = {}", config.forecast.default_months);
    println!("   max_months = {}", config.forecast.max_months);
    println!(
        "   default_low_cash_threshold = {}",
        config.forecast.default_low_cash_threshold
    );
    println!("   weeks_per_month = {}", config.forecast.weeks_per_month);
    println!();
    println!("   [confidence]");
    println!("   decay_per_month = {}", config.confidence.decay_per_month);
    println!("   floor = {}", config.confidence.floor);
    println!();
    println!("   [alerts]");
    println!("   expense_spike_ratio = {}", config.alerts.expense_spike_ratio);
    println!(
        "   opportunity_min_average_net = {}",
        config.alerts.opportunity_min_average_net
    );
    println!();

    Ok(())
}
