//! Engine tunables
//!
//! Thresholds and decay constants used by the projector, confidence model and
//! alert generator.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/pulse/config/pulse.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{DEFAULT_FORECAST_MONTHS, MAX_FORECAST_MONTHS};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pulse.toml");

/// Projection settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSettings {
    pub default_months: i64,
    /// Longer horizons are clamped to this many months
    pub max_months: i64,
    pub default_low_cash_threshold: f64,
    pub weeks_per_month: f64,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            default_months: DEFAULT_FORECAST_MONTHS,
            max_months: MAX_FORECAST_MONTHS,
            default_low_cash_threshold: 5000.0,
            weeks_per_month: 4.0,
        }
    }
}

/// Confidence decay settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfidenceSettings {
    pub decay_per_month: f64,
    pub floor: f64,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            decay_per_month: 8.0,
            floor: 50.0,
        }
    }
}

/// Alert thresholds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertSettings {
    pub expense_spike_ratio: f64,
    pub opportunity_min_average_net: f64,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            expense_spike_ratio: 1.5,
            opportunity_min_average_net: 1000.0,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PulseConfig {
    pub forecast: ForecastSettings,
    pub confidence: ConfidenceSettings,
    pub alerts: AlertSettings,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given explicitly (e.g. `--config`)
    Explicit(PathBuf),
    /// Override file in the platform data directory
    Override(PathBuf),
    /// Defaults compiled into the binary
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "{}", path.display()),
            Self::Override(path) => write!(f, "{} (override)", path.display()),
            Self::Embedded => write!(f, "built-in defaults"),
        }
    }
}

impl PulseConfig {
    /// Load configuration, returning it along with where it came from
    ///
    /// An explicit path must exist. Without one, the data-dir override is used
    /// when present, otherwise the embedded defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let source = resolve_source(explicit)?;

        let content = match &source {
            ConfigSource::Explicit(path) | ConfigSource::Override(path) => {
                fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?
            }
            ConfigSource::Embedded => DEFAULT_CONFIG.to_string(),
        };

        let config = parse_config(&content)?;
        tracing::debug!(source = %source, "Loaded pulse config");
        Ok((config, source))
    }

    /// Parse configuration from TOML text, overlaying it onto the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pulse").join("config").join("pulse.toml"))
}

fn resolve_source(explicit: Option<&Path>) -> Result<ConfigSource> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }

    match default_config_path() {
        Some(path) if path.exists() => Ok(ConfigSource::Override(path)),
        _ => Ok(ConfigSource::Embedded),
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    confidence: Option<RawConfidence>,
    alerts: Option<RawAlerts>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    default_months: Option<i64>,
    max_months: Option<i64>,
    default_low_cash_threshold: Option<f64>,
    weeks_per_month: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    decay_per_month: Option<f64>,
    floor: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAlerts {
    expense_spike_ratio: Option<f64>,
    opportunity_min_average_net: Option<f64>,
}

fn parse_config(content: &str) -> Result<PulseConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = PulseConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(months) = forecast.default_months {
            config.forecast.default_months = months;
        }
        if let Some(max) = forecast.max_months {
            config.forecast.max_months = max;
        }
        if let Some(threshold) = forecast.default_low_cash_threshold {
            config.forecast.default_low_cash_threshold = threshold;
        }
        if let Some(weeks) = forecast.weeks_per_month {
            config.forecast.weeks_per_month = weeks;
        }
    }

    if let Some(confidence) = raw.confidence {
        if let Some(decay) = confidence.decay_per_month {
            config.confidence.decay_per_month = decay;
        }
        if let Some(floor) = confidence.floor {
            config.confidence.floor = floor;
        }
    }

    if let Some(alerts) = raw.alerts {
        if let Some(ratio) = alerts.expense_spike_ratio {
            config.alerts.expense_spike_ratio = ratio;
        }
        if let Some(net) = alerts.opportunity_min_average_net {
            config.alerts.opportunity_min_average_net = net;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &PulseConfig) -> Result<()> {
    if config.forecast.default_months < 0 {
        return Err(Error::Config(
            "forecast.default_months must not be negative".to_string(),
        ));
    }
    if config.forecast.max_months <= 0 {
        return Err(Error::Config(
            "forecast.max_months must be positive".to_string(),
        ));
    }
    if !config.forecast.default_low_cash_threshold.is_finite() {
        return Err(Error::Config(
            "forecast.default_low_cash_threshold must be a finite number".to_string(),
        ));
    }
    if !(config.forecast.weeks_per_month > 0.0) {
        return Err(Error::Config(
            "forecast.weeks_per_month must be positive".to_string(),
        ));
    }
    if !(config.confidence.decay_per_month >= 0.0) {
        return Err(Error::Config(
            "confidence.decay_per_month must not be negative".to_string(),
        ));
    }
    if !(0.0..=100.0).contains(&config.confidence.floor) {
        return Err(Error::Config(
            "confidence.floor must be between 0 and 100".to_string(),
        ));
    }
    if !(config.alerts.expense_spike_ratio > 0.0) {
        return Err(Error::Config(
            "alerts.expense_spike_ratio must be positive".to_string(),
        ));
    }
    if !config.alerts.opportunity_min_average_net.is_finite() {
        return Err(Error::Config(
            "alerts.opportunity_min_average_net must be a finite number".to_string(),
        ));
    }
    Ok(())
}
