//! Frequency normalization
//!
//! Turns one income source or expense into its dollar contribution for a
//! given month of the horizon (month 0 = current month).
//!
//! The rules are a fixed table rather than a calendar recurrence engine:
//! - weekly income counts as a flat four weeks per month; expenses have no
//!   weekly cadence and a weekly expense contributes nothing
//! - quarterly amounts land on months 0, 3, 6, ...
//! - yearly and one-time amounts land on month 0 only, and a yearly item is
//!   not re-applied at month 12 even when the horizon reaches that far
//! - variable income contributes `amount * confidence / 100` every month

use crate::config::ForecastSettings;
use crate::models::{Expense, ExpenseKind, Frequency, IncomeKind, IncomeSource};

/// How an item's amount is spread across forecast months
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cadence {
    Weekly(f64),
    Monthly(f64),
    Quarterly(f64),
    Yearly(f64),
    OneTime(f64),
    /// Expected value of uncertain monthly income (confidence in 0..=100)
    Expected { amount: f64, confidence: f64 },
}

/// Why a record cannot contribute to the projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingAmount,
    InvalidAmount,
    MissingFrequency,
    UnknownFrequency,
    MissingConfidence,
    UnknownKind,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingAmount => "missing amount",
            Self::InvalidAmount => "amount is not a finite number",
            Self::MissingFrequency => "missing frequency",
            Self::UnknownFrequency => "unknown frequency",
            Self::MissingConfidence => "missing confidence",
            Self::UnknownKind => "unknown kind",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A record that can be normalized into monthly contributions
pub trait CashFlowItem {
    fn item_id(&self) -> &str;

    /// The item's cadence, or why it has none
    fn cadence(&self) -> Result<Cadence, SkipReason>;
}

fn finite_amount(amount: Option<f64>) -> Result<f64, SkipReason> {
    match amount {
        None => Err(SkipReason::MissingAmount),
        Some(a) if !a.is_finite() => Err(SkipReason::InvalidAmount),
        Some(a) => Ok(a),
    }
}

fn recurring_cadence(amount: f64, frequency: Option<Frequency>) -> Result<Cadence, SkipReason> {
    match frequency {
        None => Err(SkipReason::MissingFrequency),
        Some(Frequency::Weekly) => Ok(Cadence::Weekly(amount)),
        Some(Frequency::Monthly) => Ok(Cadence::Monthly(amount)),
        Some(Frequency::Quarterly) => Ok(Cadence::Quarterly(amount)),
        Some(Frequency::Yearly) => Ok(Cadence::Yearly(amount)),
        Some(Frequency::Unknown) => Err(SkipReason::UnknownFrequency),
    }
}

impl CashFlowItem for IncomeSource {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn cadence(&self) -> Result<Cadence, SkipReason> {
        let amount = finite_amount(self.amount)?;
        match self.kind {
            IncomeKind::Recurring => recurring_cadence(amount, self.frequency),
            IncomeKind::OneTime => Ok(Cadence::OneTime(amount)),
            IncomeKind::Variable => match self.confidence {
                Some(c) if c.is_finite() => Ok(Cadence::Expected {
                    amount,
                    confidence: c.clamp(0.0, 100.0),
                }),
                _ => Err(SkipReason::MissingConfidence),
            },
            IncomeKind::Unknown => Err(SkipReason::UnknownKind),
        }
    }
}

impl CashFlowItem for Expense {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn cadence(&self) -> Result<Cadence, SkipReason> {
        let amount = finite_amount(self.amount)?;
        match self.kind {
            ExpenseKind::Fixed | ExpenseKind::Variable => match self.frequency {
                Some(Frequency::Weekly) => Err(SkipReason::UnknownFrequency),
                frequency => recurring_cadence(amount, frequency),
            },
            ExpenseKind::Unknown => Err(SkipReason::UnknownKind),
        }
    }
}

/// Converts records into per-month dollar contributions
#[derive(Debug, Clone)]
pub struct FrequencyNormalizer {
    weeks_per_month: f64,
}

impl Default for FrequencyNormalizer {
    fn default() -> Self {
        Self::new(&ForecastSettings::default())
    }
}

impl FrequencyNormalizer {
    pub fn new(settings: &ForecastSettings) -> Self {
        Self {
            weeks_per_month: settings.weeks_per_month,
        }
    }

    /// Contribution of `item` in month `month_index`; 0 for malformed records
    pub fn monthly_contribution<T: CashFlowItem + ?Sized>(&self, item: &T, month_index: usize) -> f64 {
        item.cadence()
            .map(|cadence| self.contribution(cadence, month_index))
            .unwrap_or(0.0)
    }

    /// Contribution of an already-resolved cadence in month `month_index`
    pub fn contribution(&self, cadence: Cadence, month_index: usize) -> f64 {
        match cadence {
            Cadence::Monthly(amount) => amount,
            Cadence::Weekly(amount) => amount * self.weeks_per_month,
            Cadence::Quarterly(amount) if month_index % 3 == 0 => amount,
            Cadence::Yearly(amount) | Cadence::OneTime(amount) if month_index == 0 => amount,
            Cadence::Expected { amount, confidence } => amount * (confidence / 100.0),
            Cadence::Quarterly(_) | Cadence::Yearly(_) | Cadence::OneTime(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributions<T: CashFlowItem>(item: &T, months: usize) -> Vec<f64> {
        let normalizer = FrequencyNormalizer::default();
        (0..months)
            .map(|i| normalizer.monthly_contribution(item, i))
            .collect()
    }

    #[test]
    fn test_recurring_monthly_every_month() {
        let income = IncomeSource::recurring("i1", "Retainer", 1000.0, Frequency::Monthly);
        assert_eq!(contributions(&income, 3), vec![1000.0, 1000.0, 1000.0]);
    }

    #[test]
    fn test_weekly_uses_flat_four_weeks() {
        let income = IncomeSource::recurring("i1", "Consulting", 250.0, Frequency::Weekly);
        assert_eq!(contributions(&income, 2), vec![1000.0, 1000.0]);
    }

    #[test]
    fn test_quarterly_lands_every_third_month() {
        let income = IncomeSource::recurring("i1", "License", 900.0, Frequency::Quarterly);
        assert_eq!(
            contributions(&income, 7),
            vec![900.0, 0.0, 0.0, 900.0, 0.0, 0.0, 900.0]
        );
    }

    #[test]
    fn test_yearly_only_in_first_month_even_past_twelve() {
        let income = IncomeSource::recurring("i1", "Annual plan", 1200.0, Frequency::Yearly);
        let values = contributions(&income, 14);
        assert_eq!(values[0], 1200.0);
        assert_eq!(values[12], 0.0);
        assert_eq!(values.iter().sum::<f64>(), 1200.0);
    }

    #[test]
    fn test_one_time_only_in_first_month() {
        let income = IncomeSource::one_time("i1", "Grant", 500.0);
        assert_eq!(contributions(&income, 3), vec![500.0, 0.0, 0.0]);
    }

    #[test]
    fn test_one_time_ignores_frequency() {
        let mut income = IncomeSource::one_time("i1", "Grant", 500.0);
        income.frequency = Some(Frequency::Monthly);
        assert_eq!(contributions(&income, 2), vec![500.0, 0.0]);
    }

    #[test]
    fn test_variable_is_expected_value() {
        let income = IncomeSource::variable("i1", "Sales", 2000.0, 75.0);
        assert_eq!(contributions(&income, 2), vec![1500.0, 1500.0]);
    }

    #[test]
    fn test_variable_confidence_clamped() {
        let income = IncomeSource::variable("i1", "Sales", 2000.0, 150.0);
        assert_eq!(contributions(&income, 1), vec![2000.0]);
    }

    #[test]
    fn test_expense_kind_does_not_change_math() {
        let fixed = Expense::new("e1", "Rent", ExpenseKind::Fixed, 300.0, Frequency::Quarterly);
        let variable = Expense::new("e2", "Ads", ExpenseKind::Variable, 300.0, Frequency::Quarterly);
        assert_eq!(contributions(&fixed, 4), contributions(&variable, 4));
        assert_eq!(contributions(&fixed, 4), vec![300.0, 0.0, 0.0, 300.0]);
    }

    #[test]
    fn test_weekly_expense_contributes_zero() {
        let expense = Expense::new("e1", "Cleaning", ExpenseKind::Fixed, 100.0, Frequency::Weekly);
        assert_eq!(expense.cadence(), Err(SkipReason::UnknownFrequency));
        assert_eq!(contributions(&expense, 2), vec![0.0, 0.0]);
    }

    #[test]
    fn test_malformed_records_contribute_zero() {
        let mut missing_amount = IncomeSource::one_time("i1", "Grant", 0.0);
        missing_amount.amount = None;
        assert_eq!(missing_amount.cadence(), Err(SkipReason::MissingAmount));
        assert_eq!(contributions(&missing_amount, 1), vec![0.0]);

        let mut missing_frequency = IncomeSource::recurring("i2", "Retainer", 10.0, Frequency::Monthly);
        missing_frequency.frequency = None;
        assert_eq!(missing_frequency.cadence(), Err(SkipReason::MissingFrequency));

        let mut missing_confidence = IncomeSource::variable("i3", "Sales", 10.0, 50.0);
        missing_confidence.confidence = None;
        assert_eq!(contributions(&missing_confidence, 2), vec![0.0, 0.0]);

        let mut nan_amount = Expense::new("e1", "Rent", ExpenseKind::Fixed, 0.0, Frequency::Monthly);
        nan_amount.amount = Some(f64::NAN);
        assert_eq!(nan_amount.cadence(), Err(SkipReason::InvalidAmount));
        assert_eq!(contributions(&nan_amount, 1), vec![0.0]);
    }

    #[test]
    fn test_unknown_enum_values_contribute_zero() {
        let mut income = IncomeSource::recurring("i1", "Retainer", 10.0, Frequency::Unknown);
        assert_eq!(income.cadence(), Err(SkipReason::UnknownFrequency));
        income.kind = IncomeKind::Unknown;
        assert_eq!(income.cadence(), Err(SkipReason::UnknownKind));

        let mut expense = Expense::new("e1", "Rent", ExpenseKind::Fixed, 10.0, Frequency::Monthly);
        expense.kind = ExpenseKind::Unknown;
        assert_eq!(contributions(&expense, 2), vec![0.0, 0.0]);
    }
}
