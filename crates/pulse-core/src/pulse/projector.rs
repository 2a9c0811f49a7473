//! Forecast projection
//!
//! Rolls normalized monthly contributions forward into a running balance.
//! The balance accumulator is carried at full precision across the whole
//! horizon; only the emitted `CashFlowForecast` values are rounded.

use crate::config::PulseConfig;
use crate::models::MAX_FORECAST_MONTHS;
use crate::models::{Expense, IncomeSource};

use super::confidence::ConfidenceModel;
use super::normalizer::{CashFlowItem, FrequencyNormalizer};
use super::round_half_up;
use super::types::{CashFlowForecast, YearMonth};

/// One month of a trajectory before rounding
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMonth {
    pub index: usize,
    pub month: YearMonth,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
    pub running_balance: f64,
    pub confidence: u8,
}

impl ProjectedMonth {
    pub fn to_forecast(&self) -> CashFlowForecast {
        CashFlowForecast {
            month: self.month,
            predicted_income: round_half_up(self.income),
            predicted_expenses: round_half_up(self.expenses),
            net_cash_flow: round_half_up(self.net),
            running_balance: round_half_up(self.running_balance),
            confidence: self.confidence,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastProjector {
    normalizer: FrequencyNormalizer,
    confidence: ConfidenceModel,
    max_months: i64,
}

impl Default for ForecastProjector {
    fn default() -> Self {
        Self::new(&PulseConfig::default())
    }
}

impl ForecastProjector {
    pub fn new(config: &PulseConfig) -> Self {
        Self {
            normalizer: FrequencyNormalizer::new(&config.forecast),
            confidence: ConfidenceModel::new(&config.confidence),
            max_months: config.forecast.max_months.max(1),
        }
    }

    /// Unrounded trajectory starting at `start`
    ///
    /// Empty when `forecast_months <= 0`. Horizons past the configured
    /// maximum are clamped to it.
    pub fn trajectory(
        &self,
        start: YearMonth,
        current_balance: f64,
        income_sources: &[IncomeSource],
        expenses: &[Expense],
        forecast_months: i64,
    ) -> Vec<ProjectedMonth> {
        if forecast_months <= 0 {
            return Vec::new();
        }
        let months = if forecast_months > self.max_months {
            tracing::warn!(
                requested = forecast_months,
                max = self.max_months,
                "Forecast horizon too long, clamping"
            );
            self.max_months
        } else {
            forecast_months
        };
        let months = usize::try_from(months).unwrap_or(MAX_FORECAST_MONTHS as usize);

        warn_skipped("income source", income_sources);
        warn_skipped("expense", expenses);

        let mut running_balance = if current_balance.is_finite() {
            current_balance
        } else {
            tracing::warn!(current_balance, "Non-finite current balance, starting from 0");
            0.0
        };
        let income_confidence = ConfidenceModel::income_confidence(income_sources);

        let mut trajectory = Vec::with_capacity(months.min(MAX_FORECAST_MONTHS as usize));
        for i in 0..months {
            let income: f64 = income_sources
                .iter()
                .map(|s| self.normalizer.monthly_contribution(s, i))
                .sum();
            let spent: f64 = expenses
                .iter()
                .map(|e| self.normalizer.monthly_contribution(e, i))
                .sum();
            let net = income - spent;
            running_balance += net;

            trajectory.push(ProjectedMonth {
                index: i,
                month: start.offset(i),
                income,
                expenses: spent,
                net,
                running_balance,
                confidence: self.confidence.confidence_for(income_confidence, i),
            });
        }

        trajectory
    }

    /// Rounded forecasts, one per month, ascending
    pub fn project(
        &self,
        start: YearMonth,
        current_balance: f64,
        income_sources: &[IncomeSource],
        expenses: &[Expense],
        forecast_months: i64,
    ) -> Vec<CashFlowForecast> {
        self.trajectory(start, current_balance, income_sources, expenses, forecast_months)
            .iter()
            .map(ProjectedMonth::to_forecast)
            .collect()
    }
}

/// Log each record that will be treated as contributing nothing
fn warn_skipped<T: CashFlowItem>(label: &str, items: &[T]) {
    for item in items {
        if let Err(reason) = item.cadence() {
            tracing::warn!(
                kind = label,
                id = item.item_id(),
                reason = reason.as_str(),
                "Skipping malformed record in forecast"
            );
        }
    }
}
