//! Trajectory summary
//!
//! Headline figures a dashboard shows next to the forecast table. Derived
//! from already-rounded forecasts; nothing here feeds back into projection.

use serde::{Deserialize, Serialize};

use super::types::{CashFlowForecast, YearMonth};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub months: usize,
    pub total_income: i64,
    pub total_expenses: i64,
    pub average_net_cash_flow: f64,
    pub ending_balance: Option<i64>,
    pub lowest_balance: Option<i64>,
    pub lowest_balance_month: Option<YearMonth>,
    /// Months before the balance first goes negative; `None` if it never does
    /// within the horizon
    pub runway_months: Option<usize>,
    pub first_negative_month: Option<YearMonth>,
    /// Display-only savings goal supplied by the caller
    pub target_savings: f64,
    pub target_reached_month: Option<YearMonth>,
    pub min_confidence: Option<u8>,
}

impl ForecastSummary {
    pub fn from_forecasts(forecasts: &[CashFlowForecast], target_savings: f64) -> Self {
        let total_income = forecasts
            .iter()
            .fold(0i64, |acc, f| acc.saturating_add(f.predicted_income));
        let total_expenses = forecasts
            .iter()
            .fold(0i64, |acc, f| acc.saturating_add(f.predicted_expenses));
        let total_net: f64 = forecasts.iter().map(|f| f.net_cash_flow as f64).sum();
        let average_net_cash_flow = if forecasts.is_empty() {
            0.0
        } else {
            total_net / forecasts.len() as f64
        };

        // First month wins ties
        let lowest = forecasts.iter().reduce(|low, f| {
            if f.running_balance < low.running_balance {
                f
            } else {
                low
            }
        });
        let first_negative = forecasts.iter().position(|f| f.running_balance < 0);

        Self {
            months: forecasts.len(),
            total_income,
            total_expenses,
            average_net_cash_flow,
            ending_balance: forecasts.last().map(|f| f.running_balance),
            lowest_balance: lowest.map(|f| f.running_balance),
            lowest_balance_month: lowest.map(|f| f.month),
            runway_months: first_negative,
            first_negative_month: first_negative.map(|i| forecasts[i].month),
            target_savings,
            target_reached_month: forecasts
                .iter()
                .find(|f| f.running_balance as f64 >= target_savings)
                .map(|f| f.month),
            min_confidence: forecasts.iter().map(|f| f.confidence).min(),
        }
    }

    pub fn has_shortfall(&self) -> bool {
        self.first_negative_month.is_some()
    }
}
