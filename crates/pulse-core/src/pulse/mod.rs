//! Pulse - cash-flow forecasting and alerting
//!
//! Given a balance, income sources and expenses, Pulse projects a monthly
//! balance trajectory with decaying confidence and derives alerts from it.
//!
//! ## Components
//!
//! - **Frequency Normalizer** - per-month contribution of one record
//! - **Confidence Model** - advisory confidence per forecast month
//! - **Forecast Projector** - running balance over the horizon
//! - **Alert Generator** - low cash, expense spike and surplus alerts
//! - **Pulse Engine** - pure `recalculate` entry point tying them together
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_core::{PulseEngine, PulseInputs};
//!
//! let inputs = PulseInputs::from_json(&snapshot)?;
//! let report = PulseEngine::new().recalculate_inputs(&inputs, today);
//! ```

pub mod alerts;
pub mod confidence;
pub mod engine;
pub mod normalizer;
pub mod projector;
pub mod summary;
pub mod types;

pub use alerts::{AlertContext, AlertGenerator, AlertRule};
pub use confidence::ConfidenceModel;
pub use engine::{recalculate, PulseEngine};
pub use normalizer::{Cadence, CashFlowItem, FrequencyNormalizer, SkipReason};
pub use projector::{ForecastProjector, ProjectedMonth};
pub use summary::ForecastSummary;
pub use types::{
    format_currency, AlertSeverity, AlertType, CashFlowForecast, PulseAlert, PulseReport,
    YearMonth,
};

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2)
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
