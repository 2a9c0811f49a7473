//! Domain models for Pulse
//!
//! Income sources and expenses arrive from the dashboard's store as loosely
//! validated records. Enum fields fall back to `Unknown` and numeric fields are
//! optional, so a single bad record deserializes and is skipped by the
//! normalizer instead of failing the whole snapshot.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Forecast horizon used when neither the snapshot nor the config sets one
pub const DEFAULT_FORECAST_MONTHS: i64 = 6;

/// Longest horizon projected unless the config says otherwise (100 years)
pub const MAX_FORECAST_MONTHS: i64 = 1200;

/// Recurrence of an income source or expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    /// Any value the engine does not recognize
    #[serde(other)]
    Unknown,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Unknown => "unknown",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" => Ok(Self::Yearly),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an income source behaves over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncomeKind {
    /// Repeats on its `frequency`
    Recurring,
    /// Lands once, in the current month
    #[serde(rename = "one-time", alias = "one_time")]
    OneTime,
    /// Uncertain monthly income weighted by `confidence`
    Variable,
    #[default]
    #[serde(other)]
    Unknown,
}

impl IncomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recurring => "recurring",
            Self::OneTime => "one-time",
            Self::Variable => "variable",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expense classification (display only, does not change the math)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Fixed,
    Variable,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Variable => "variable",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A source of incoming cash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: IncomeKind,
    #[serde(default)]
    pub amount: Option<f64>,
    /// Required for recurring income, ignored otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// 0-100, only meaningful for variable income
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl IncomeSource {
    pub fn recurring(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: IncomeKind::Recurring,
            amount: Some(amount),
            frequency: Some(frequency),
            confidence: None,
        }
    }

    pub fn one_time(id: impl Into<String>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: IncomeKind::OneTime,
            amount: Some(amount),
            frequency: None,
            confidence: None,
        }
    }

    pub fn variable(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: IncomeKind::Variable,
            amount: Some(amount),
            frequency: None,
            confidence: Some(confidence),
        }
    }
}

/// A recurring cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: ExpenseKind,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    /// Free-form display tag (e.g. "Payroll", "Hosting")
    #[serde(default)]
    pub category: String,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ExpenseKind,
        amount: f64,
        frequency: Frequency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            amount: Some(amount),
            frequency: Some(frequency),
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Everything the engine needs for one recalculation, as persisted by the caller
///
/// Field names accept both snake_case and the dashboard store's camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseInputs {
    #[serde(default, alias = "currentBalance")]
    pub current_balance: f64,
    /// Falls back to the configured default when absent
    #[serde(default, alias = "lowCashThreshold")]
    pub low_cash_threshold: Option<f64>,
    /// Display only; never used by the projection
    #[serde(default, alias = "targetSavings")]
    pub target_savings: f64,
    /// Falls back to the configured default horizon when absent
    #[serde(default, alias = "forecastMonths")]
    pub forecast_months: Option<i64>,
    #[serde(default, alias = "incomeSources")]
    pub income_sources: Vec<IncomeSource>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl PulseInputs {
    /// Parse a snapshot from JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
