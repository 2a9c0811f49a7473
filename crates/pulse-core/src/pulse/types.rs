//! Core types for the Pulse engine

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A calendar month, serialized as `"YYYY-MM"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month `months` after this one, saturating at the last
    /// representable year
    pub fn offset(&self, months: usize) -> Self {
        let base = self.year as i64 * 12 + (self.month as i64 - 1);
        let total = base.saturating_add(i64::try_from(months).unwrap_or(i64::MAX));
        match i32::try_from(total.div_euclid(12)) {
            Ok(year) => Self {
                year,
                month: total.rem_euclid(12) as u32 + 1,
            },
            Err(_) => Self {
                year: i32::MAX,
                month: 12,
            },
        }
    }

    /// Human-readable label, e.g. "November 2026"
    pub fn label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month key: {}", s))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("Invalid year in month key: {}", s))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| format!("Invalid month in month key: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Projected cash position for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowForecast {
    pub month: YearMonth,
    pub predicted_income: i64,
    pub predicted_expenses: i64,
    pub net_cash_flow: i64,
    pub running_balance: i64,
    /// Advisory 0-100 score; never affects the dollar figures
    pub confidence: u8,
}

/// Kinds of alerts derived from a trajectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Balance projected below the low-cash threshold
    LowCash,
    /// Expenses jump sharply month over month
    ExpenseSpike,
    /// Sustained surplus across the horizon
    Opportunity,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::LowCash => "low_cash",
            AlertType::ExpenseSpike => "expense_spike",
            AlertType::Opportunity => "opportunity",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_cash" => Ok(AlertType::LowCash),
            "expense_spike" => Ok(AlertType::ExpenseSpike),
            "opportunity" => Ok(AlertType::Opportunity),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

/// Severity level of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            AlertSeverity::Info => 1,
            AlertSeverity::Warning => 2,
            AlertSeverity::Critical => 3,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertSeverity::Info),
            "warning" => Ok(AlertSeverity::Warning),
            "critical" => Ok(AlertSeverity::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// An alert derived from a forecast trajectory
///
/// The id is built from the alert type, its month and an optional
/// discriminator, so the same condition yields the same id on every
/// recalculation and caller-side dismissals keep matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseAlert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    /// Forecast month the alert refers to
    pub date: YearMonth,
    /// Owned by the caller; always false when generated
    pub dismissed: bool,
}

impl PulseAlert {
    /// Create an alert keyed on `type:date`
    pub fn new(
        alert_type: AlertType,
        severity: AlertSeverity,
        date: YearMonth,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{}:{}", alert_type.as_str(), date),
            alert_type,
            severity,
            title: title.into(),
            message: message.into(),
            date,
            dismissed: false,
        }
    }

    /// Extend the id with a type-specific discriminator
    pub fn with_discriminator(mut self, discriminator: &str) -> Self {
        self.id = format!("{}:{}", self.id, discriminator);
        self
    }
}

/// Result of one recalculation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PulseReport {
    pub forecasts: Vec<CashFlowForecast>,
    pub alerts: Vec<PulseAlert>,
}

impl PulseReport {
    pub fn is_empty(&self) -> bool {
        self.forecasts.is_empty() && self.alerts.is_empty()
    }

    /// Mark alerts whose id the caller has dismissed
    ///
    /// Returns the number of alerts marked.
    pub fn apply_dismissals(&mut self, dismissed: &HashSet<String>) -> usize {
        let mut count = 0;
        for alert in &mut self.alerts {
            if dismissed.contains(&alert.id) {
                alert.dismissed = true;
                count += 1;
            }
        }
        count
    }

    /// Alerts the caller has not dismissed
    pub fn active_alerts(&self) -> impl Iterator<Item = &PulseAlert> {
        self.alerts.iter().filter(|a| !a.dismissed)
    }
}

/// Format a dollar amount rounded to whole units, e.g. `$12,500` or `-$20`
pub fn format_currency(amount: f64) -> String {
    let rounded = super::round_half_up(amount);
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
