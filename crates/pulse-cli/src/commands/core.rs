//! Shared command utilities
//!
//! Every command follows the same bootstrap: load the engine config, load the
//! caller's snapshot, then recalculate once.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use pulse_core::{PulseConfig, PulseEngine, PulseInputs};

/// Build an engine from the resolved config
pub fn load_engine(config_path: Option<&Path>) -> Result<PulseEngine> {
    let (config, source) = PulseConfig::load(config_path).context("Failed to load config")?;
    tracing::debug!(source = %source, "Using engine config");
    Ok(PulseEngine::with_config(config))
}

/// Read and parse a snapshot JSON file
pub fn load_snapshot(path: &Path) -> Result<PulseInputs> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let inputs = PulseInputs::from_json(&content)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))?;

    tracing::info!(
        income_sources = inputs.income_sources.len(),
        expenses = inputs.expenses.len(),
        "Loaded snapshot"
    );
    Ok(inputs)
}

/// Apply command-line overrides on top of the snapshot
pub fn apply_overrides(inputs: &mut PulseInputs, months: Option<i64>, threshold: Option<f64>) {
    if let Some(months) = months {
        inputs.forecast_months = Some(months);
    }
    if let Some(threshold) = threshold {
        inputs.low_cash_threshold = Some(threshold);
    }
}

/// Parse `--as-of`, defaulting to today
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid --as-of date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
