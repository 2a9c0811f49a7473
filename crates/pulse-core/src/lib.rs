//! Pulse Core Library
//!
//! Cash-flow forecasting and alerting for the founder dashboard:
//! - Income/expense models with tolerant deserialization
//! - Frequency normalization into per-month contributions
//! - Running-balance projection with decaying confidence
//! - Low cash, expense spike, and surplus alerts with stable ids
//! - Engine tunables loaded from TOML with embedded defaults

pub mod config;
pub mod error;
pub mod models;
pub mod pulse;

pub use config::{ConfigSource, PulseConfig};
pub use error::{Error, Result};
pub use models::{
    Expense, ExpenseKind, Frequency, IncomeKind, IncomeSource, PulseInputs, DEFAULT_FORECAST_MONTHS,
    MAX_FORECAST_MONTHS,
};
pub use pulse::{
    recalculate, AlertGenerator, AlertSeverity, AlertType, CashFlowForecast, ForecastProjector,
    ForecastSummary, PulseAlert, PulseEngine, PulseReport, YearMonth,
};
