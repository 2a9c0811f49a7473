//! Pulse Engine - one entry point for projection plus alerts
//!
//! The engine holds only configuration and the alert rule registry. Every
//! `recalculate` call borrows the caller's records, builds a fresh report and
//! keeps nothing afterwards; the caller decides when to recompute and what to
//! persist.

use chrono::NaiveDate;

use crate::config::PulseConfig;
use crate::models::{Expense, IncomeSource, PulseInputs};

use super::alerts::AlertGenerator;
use super::projector::ForecastProjector;
use super::types::{AlertType, PulseReport, YearMonth};

pub struct PulseEngine {
    config: PulseConfig,
    projector: ForecastProjector,
    alerts: AlertGenerator,
}

impl Default for PulseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseEngine {
    /// Create an engine with the built-in defaults
    pub fn new() -> Self {
        Self::with_config(PulseConfig::default())
    }

    pub fn with_config(config: PulseConfig) -> Self {
        Self {
            projector: ForecastProjector::new(&config),
            alerts: AlertGenerator::new(&config.alerts),
            config,
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    /// Project the balance and derive alerts
    ///
    /// `as_of` fixes month 0 of the horizon. Returns an empty report when
    /// `forecast_months <= 0`.
    pub fn recalculate(
        &self,
        current_balance: f64,
        income_sources: &[IncomeSource],
        expenses: &[Expense],
        forecast_months: i64,
        low_cash_threshold: f64,
        as_of: NaiveDate,
    ) -> PulseReport {
        let start = YearMonth::from_date(as_of);
        let forecasts = self.projector.project(
            start,
            current_balance,
            income_sources,
            expenses,
            forecast_months,
        );
        let alerts = self.alerts.generate(&forecasts, low_cash_threshold);

        tracing::debug!(
            start = %start,
            months = forecasts.len(),
            income_sources = income_sources.len(),
            expenses = expenses.len(),
            alerts = alerts.len(),
            "Pulse recalculated"
        );

        PulseReport { forecasts, alerts }
    }

    /// Recalculate from a caller snapshot, filling unset fields from config
    pub fn recalculate_inputs(&self, inputs: &PulseInputs, as_of: NaiveDate) -> PulseReport {
        self.recalculate(
            inputs.current_balance,
            &inputs.income_sources,
            &inputs.expenses,
            self.forecast_months(inputs),
            self.low_cash_threshold(inputs),
            as_of,
        )
    }

    /// Recalculate with month 0 set to the local current month
    pub fn recalculate_now(&self, inputs: &PulseInputs) -> PulseReport {
        self.recalculate_inputs(inputs, chrono::Local::now().date_naive())
    }

    /// Horizon a snapshot resolves to
    pub fn forecast_months(&self, inputs: &PulseInputs) -> i64 {
        inputs
            .forecast_months
            .unwrap_or(self.config.forecast.default_months)
    }

    /// Low-cash threshold a snapshot resolves to
    pub fn low_cash_threshold(&self, inputs: &PulseInputs) -> f64 {
        inputs
            .low_cash_threshold
            .unwrap_or(self.config.forecast.default_low_cash_threshold)
    }

    pub fn alert_types(&self) -> Vec<AlertType> {
        self.alerts.alert_types()
    }
}

/// Recalculate with the default engine configuration
pub fn recalculate(
    current_balance: f64,
    income_sources: &[IncomeSource],
    expenses: &[Expense],
    forecast_months: i64,
    low_cash_threshold: f64,
    as_of: NaiveDate,
) -> PulseReport {
    PulseEngine::new().recalculate(
        current_balance,
        income_sources,
        expenses,
        forecast_months,
        low_cash_threshold,
        as_of,
    )
}
