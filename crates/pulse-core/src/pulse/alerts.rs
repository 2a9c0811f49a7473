//! Alert generation
//!
//! Alert rules run once over a finished trajectory:
//!
//! - **Low cash** - one alert per month whose balance is under the threshold,
//!   critical when the balance is negative
//! - **Expense spike** - expenses grow past a ratio of the previous month
//! - **Opportunity** - average net cash flow across the horizon is high enough
//!   to suggest a larger runway buffer

use crate::config::AlertSettings;

use super::types::{format_currency, AlertSeverity, AlertType, CashFlowForecast, PulseAlert};

/// Input shared by every alert rule
pub struct AlertContext<'a> {
    /// Completed trajectory, ascending by month
    pub forecasts: &'a [CashFlowForecast],
    pub low_cash_threshold: f64,
}

/// A single alert rule
pub trait AlertRule: Send + Sync {
    fn alert_type(&self) -> AlertType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<PulseAlert>;
}

/// Flags every month with a balance under the threshold
///
/// Consecutive months are not collapsed: three low months produce three alerts.
pub struct LowCashRule;

impl AlertRule for LowCashRule {
    fn alert_type(&self) -> AlertType {
        AlertType::LowCash
    }

    fn name(&self) -> &'static str {
        "Low Cash"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<PulseAlert> {
        ctx.forecasts
            .iter()
            .filter(|f| (f.running_balance as f64) < ctx.low_cash_threshold)
            .map(|f| {
                let (severity, title) = if f.running_balance < 0 {
                    (AlertSeverity::Critical, "Negative balance projected")
                } else {
                    (AlertSeverity::Warning, "Low cash ahead")
                };

                PulseAlert::new(
                    AlertType::LowCash,
                    severity,
                    f.month,
                    title,
                    format!(
                        "Projected balance for {} is {}, below your {} threshold.",
                        f.month.label(),
                        format_currency(f.running_balance as f64),
                        format_currency(ctx.low_cash_threshold)
                    ),
                )
                .with_discriminator(severity.as_str())
            })
            .collect()
    }
}

/// Flags months whose expenses exceed the previous month's by a ratio
pub struct ExpenseSpikeRule {
    ratio: f64,
}

impl ExpenseSpikeRule {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }
}

impl AlertRule for ExpenseSpikeRule {
    fn alert_type(&self) -> AlertType {
        AlertType::ExpenseSpike
    }

    fn name(&self) -> &'static str {
        "Expense Spike"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<PulseAlert> {
        ctx.forecasts
            .windows(2)
            .filter_map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                let previous = prev.predicted_expenses as f64;
                let current = curr.predicted_expenses as f64;
                if current <= previous * self.ratio {
                    return None;
                }

                let growth = if previous > 0.0 {
                    format!(" ({:.1}x the prior month)", current / previous)
                } else {
                    String::new()
                };

                Some(PulseAlert::new(
                    AlertType::ExpenseSpike,
                    AlertSeverity::Info,
                    curr.month,
                    "Expense spike",
                    format!(
                        "Expenses rise from {} to {} in {}{}.",
                        format_currency(previous),
                        format_currency(current),
                        curr.month.label(),
                        growth
                    ),
                ))
            })
            .collect()
    }
}

/// Suggests a larger runway buffer when the horizon averages a healthy surplus
pub struct OpportunityRule {
    min_average_net: f64,
}

impl OpportunityRule {
    pub fn new(min_average_net: f64) -> Self {
        Self { min_average_net }
    }
}

impl AlertRule for OpportunityRule {
    fn alert_type(&self) -> AlertType {
        AlertType::Opportunity
    }

    fn name(&self) -> &'static str {
        "Surplus Opportunity"
    }

    fn evaluate(&self, ctx: &AlertContext<'_>) -> Vec<PulseAlert> {
        let Some(first) = ctx.forecasts.first() else {
            return vec![];
        };

        let total: f64 = ctx.forecasts.iter().map(|f| f.net_cash_flow as f64).sum();
        let average = total / ctx.forecasts.len() as f64;
        if average <= self.min_average_net {
            return vec![];
        }

        vec![PulseAlert::new(
            AlertType::Opportunity,
            AlertSeverity::Info,
            first.month,
            "Surplus opportunity",
            format!(
                "Net cash flow averages {}/month over the next {} months. \
                 Consider setting aside a larger runway buffer.",
                format_currency(average),
                ctx.forecasts.len()
            ),
        )]
    }
}

/// Runs every registered rule over a trajectory
pub struct AlertGenerator {
    rules: Vec<Box<dyn AlertRule>>,
}

impl Default for AlertGenerator {
    fn default() -> Self {
        Self::new(&AlertSettings::default())
    }
}

impl AlertGenerator {
    /// Create a generator with the built-in rules
    pub fn new(settings: &AlertSettings) -> Self {
        let mut generator = Self { rules: vec![] };

        generator.register(Box::new(LowCashRule));
        generator.register(Box::new(ExpenseSpikeRule::new(settings.expense_spike_ratio)));
        generator.register(Box::new(OpportunityRule::new(
            settings.opportunity_min_average_net,
        )));

        generator
    }

    pub fn register(&mut self, rule: Box<dyn AlertRule>) {
        self.rules.push(rule);
    }

    /// Evaluate all rules, most severe first, then by month
    pub fn generate(
        &self,
        forecasts: &[CashFlowForecast],
        low_cash_threshold: f64,
    ) -> Vec<PulseAlert> {
        let ctx = AlertContext {
            forecasts,
            low_cash_threshold,
        };

        let mut alerts = vec![];
        for rule in &self.rules {
            let found = rule.evaluate(&ctx);
            tracing::debug!(rule = rule.name(), count = found.len(), "Alert rule evaluated");
            alerts.extend(found);
        }

        alerts.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.date.cmp(&b.date))
        });

        alerts
    }

    pub fn alert_types(&self) -> Vec<AlertType> {
        self.rules.iter().map(|r| r.alert_type()).collect()
    }
}
