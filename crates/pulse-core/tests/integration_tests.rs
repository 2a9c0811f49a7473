//! Integration tests for pulse-core
//!
//! These tests exercise the full snapshot -> recalculate -> alerts workflow
//! through the public API only.

use std::collections::HashSet;

use chrono::NaiveDate;
use pulse_core::{
    recalculate,
    pulse::{ForecastProjector, YearMonth},
    AlertGenerator, AlertSeverity, AlertType, Expense, ExpenseKind, ForecastSummary, Frequency,
    IncomeSource, PulseConfig, PulseEngine, PulseInputs, PulseReport, MAX_FORECAST_MONTHS,
};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn low_cash_count(report: &pulse_core::PulseReport) -> usize {
    report
        .alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::LowCash)
        .count()
}

// =============================================================================
// Projection
// =============================================================================

#[test]
fn test_forecast_length_and_confidence_bounds() {
    let income = vec![
        IncomeSource::recurring("i1", "Retainer", 4000.0, Frequency::Monthly),
        IncomeSource::variable("i2", "Marketplace", 1800.0, 65.0),
        IncomeSource::recurring("i3", "Annual license", 12000.0, Frequency::Yearly),
    ];
    let expenses = vec![
        Expense::new("e1", "Payroll", ExpenseKind::Fixed, 6000.0, Frequency::Monthly),
        Expense::new("e2", "Insurance", ExpenseKind::Fixed, 900.0, Frequency::Quarterly),
    ];

    for months in [1, 6, 12, 24] {
        let report = recalculate(10_000.0, &income, &expenses, months, 2000.0, as_of());
        assert_eq!(report.forecasts.len(), months as usize);
        for forecast in &report.forecasts {
            assert!(forecast.confidence <= 100);
        }
        for pair in report.forecasts.windows(2) {
            assert!(pair[0].month < pair[1].month);
        }
    }
}

#[test]
fn test_monthly_recurring_income_trajectory() {
    let income = vec![IncomeSource::recurring("i1", "Retainer", 1000.0, Frequency::Monthly)];
    let report = recalculate(0.0, &income, &[], 3, 0.0, as_of());

    let rows: Vec<_> = report
        .forecasts
        .iter()
        .map(|f| {
            (
                f.predicted_income,
                f.predicted_expenses,
                f.net_cash_flow,
                f.running_balance,
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![(1000, 0, 1000, 1000), (1000, 0, 1000, 2000), (1000, 0, 1000, 3000)]
    );
}

#[test]
fn test_one_time_income_only_in_first_month() {
    let income = vec![IncomeSource::one_time("i1", "Grant", 500.0)];
    let report = recalculate(0.0, &income, &[], 4, 0.0, as_of());

    assert_eq!(report.forecasts[0].predicted_income, 500);
    for forecast in &report.forecasts[1..] {
        assert_eq!(forecast.predicted_income, 0);
        assert_eq!(forecast.running_balance, 500);
    }
}

/// Yearly items are applied once, in month 0, and deliberately not repeated
/// at month 12 even when the horizon covers it.
#[test]
fn test_yearly_income_not_reapplied_at_month_twelve() {
    let income = vec![IncomeSource::recurring("i1", "Annual plan", 1200.0, Frequency::Yearly)];
    let report = recalculate(0.0, &income, &[], 14, 0.0, as_of());

    assert_eq!(report.forecasts[0].predicted_income, 1200);
    assert_eq!(report.forecasts[12].predicted_income, 0);
    assert_eq!(report.forecasts[13].running_balance, 1200);
}

/// Quarterly items land on months 0, 3, 6, ... of the horizon regardless of
/// when they were originally billed.
#[test]
fn test_quarterly_expense_pinned_to_horizon_start() {
    let expenses = vec![Expense::new("e1", "Taxes", ExpenseKind::Fixed, 3000.0, Frequency::Quarterly)];
    let report = recalculate(20_000.0, &[], &expenses, 7, 0.0, as_of());

    let paid: Vec<_> = report.forecasts.iter().map(|f| f.predicted_expenses).collect();
    assert_eq!(paid, vec![3000, 0, 0, 3000, 0, 0, 3000]);
}

#[test]
fn test_weekly_expense_is_not_counted() {
    let inputs = PulseInputs::from_json(
        r#"{
            "currentBalance": 1000,
            "forecastMonths": 2,
            "expenses": [{"id": "e1", "name": "Cleaning", "kind": "fixed", "amount": 100, "frequency": "weekly"}]
        }"#,
    )
    .unwrap();
    let report = PulseEngine::new().recalculate_inputs(&inputs, as_of());

    let paid: Vec<_> = report.forecasts.iter().map(|f| f.predicted_expenses).collect();
    assert_eq!(paid, vec![0, 0]);
    assert_eq!(report.forecasts[1].running_balance, 1000);
}

#[test]
fn test_huge_horizon_is_clamped() {
    let report = recalculate(0.0, &[], &[], i64::MAX, 0.0, as_of());
    assert_eq!(report.forecasts.len(), MAX_FORECAST_MONTHS as usize);
}

#[test]
fn test_very_large_amounts_do_not_overflow() {
    let income = vec![IncomeSource::recurring("i1", "Windfall", 5e18, Frequency::Monthly)];
    let report = recalculate(0.0, &income, &[], 3, 0.0, as_of());

    assert_eq!(report.forecasts.len(), 3);
    assert!(report
        .alerts
        .iter()
        .any(|a| a.alert_type == AlertType::Opportunity));

    let summary = ForecastSummary::from_forecasts(&report.forecasts, 0.0);
    assert_eq!(summary.months, 3);
    assert!(summary.average_net_cash_flow > 0.0);
}

#[test]
fn test_unrounded_accumulator_is_additive() {
    let income = vec![IncomeSource::variable("i1", "Tips", 333.33, 37.0)];
    let expenses = vec![Expense::new("e1", "Coffee", ExpenseKind::Variable, 12.345, Frequency::Monthly)];

    let projector = ForecastProjector::new(&PulseConfig::default());
    let trajectory = projector.trajectory(
        YearMonth::from_date(as_of()),
        100.25,
        &income,
        &expenses,
        12,
    );

    assert_eq!(trajectory[0].running_balance, 100.25 + trajectory[0].net);
    for pair in trajectory.windows(2) {
        assert_eq!(pair[1].running_balance, pair[0].running_balance + pair[1].net);
    }

    // Black-box view: rounded outputs stay within one unit of the recurrence
    let forecasts = projector.project(
        YearMonth::from_date(as_of()),
        100.25,
        &income,
        &expenses,
        12,
    );
    for pair in forecasts.windows(2) {
        let expected = pair[0].running_balance + pair[1].net_cash_flow;
        assert!((pair[1].running_balance - expected).abs() <= 1);
    }
}

// =============================================================================
// Alerts
// =============================================================================

#[test]
fn test_low_cash_warnings_each_month() {
    let report = recalculate(50.0, &[], &[], 3, 100.0, as_of());

    assert_eq!(low_cash_count(&report), 3);
    assert_eq!(report.alerts.len(), 3);
    assert!(report
        .alerts
        .iter()
        .all(|a| a.severity == AlertSeverity::Warning && !a.dismissed));
}

#[test]
fn test_negative_balance_escalates_to_critical() {
    let report = recalculate(-20.0, &[], &[], 3, 100.0, as_of());

    assert_eq!(low_cash_count(&report), 3);
    assert!(report
        .alerts
        .iter()
        .all(|a| a.severity == AlertSeverity::Critical));
}

#[test]
fn test_expense_spike_detection() {
    // 100/month plus a 200 quarterly expense: months 0 and 3 are 300, so the
    // jump from month 2 (100) to month 3 (300) is the only spike.
    let expenses = vec![
        Expense::new("e1", "Hosting", ExpenseKind::Fixed, 100.0, Frequency::Monthly),
        Expense::new("e2", "Audit", ExpenseKind::Fixed, 200.0, Frequency::Quarterly),
    ];
    let report = recalculate(100_000.0, &[], &expenses, 4, 0.0, as_of());

    let spikes: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::ExpenseSpike)
        .collect();
    assert_eq!(spikes.len(), 1);
    assert_eq!(spikes[0].date, report.forecasts[3].month);
    assert_eq!(spikes[0].severity, AlertSeverity::Info);
}

#[test]
fn test_no_spike_within_ratio() {
    // 100 -> 140 month over month never exceeds 1.5x
    let expenses = vec![
        Expense::new("e1", "Hosting", ExpenseKind::Fixed, 100.0, Frequency::Monthly),
        Expense::new("e2", "Audit", ExpenseKind::Fixed, 40.0, Frequency::Quarterly),
    ];
    let report = recalculate(100_000.0, &[], &expenses, 6, 0.0, as_of());

    assert!(report
        .alerts
        .iter()
        .all(|a| a.alert_type != AlertType::ExpenseSpike));
}

#[test]
fn test_opportunity_for_sustained_surplus() {
    let income = vec![IncomeSource::recurring("i1", "Retainer", 5000.0, Frequency::Monthly)];
    let expenses = vec![Expense::new("e1", "Payroll", ExpenseKind::Fixed, 3000.0, Frequency::Monthly)];
    let report = recalculate(1000.0, &income, &expenses, 6, 500.0, as_of());

    let opportunities: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.alert_type == AlertType::Opportunity)
        .collect();
    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].date, YearMonth::from_date(as_of()));
}

// =============================================================================
// Purity and identity
// =============================================================================

#[test]
fn test_recalculate_is_deterministic() {
    let income = vec![
        IncomeSource::recurring("i1", "Retainer", 2500.0, Frequency::Monthly),
        IncomeSource::variable("i2", "Sales", 900.0, 60.0),
    ];
    let expenses = vec![
        Expense::new("e1", "Payroll", ExpenseKind::Fixed, 4000.0, Frequency::Monthly),
        Expense::new("e2", "Conference", ExpenseKind::Variable, 2500.0, Frequency::Quarterly),
    ];

    let first = recalculate(3000.0, &income, &expenses, 6, 2000.0, as_of());
    let second = recalculate(3000.0, &income, &expenses, 6, 2000.0, as_of());

    assert!(!first.alerts.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_dismissals_survive_recalculation() {
    let engine = PulseEngine::new();
    let mut inputs = PulseInputs {
        current_balance: 50.0,
        low_cash_threshold: Some(100.0),
        forecast_months: Some(3),
        ..Default::default()
    };

    let report = engine.recalculate_inputs(&inputs, as_of());
    let dismissed: HashSet<String> = report.alerts.iter().map(|a| a.id.clone()).collect();

    // An unrelated edit triggers a recompute; same conditions keep their ids
    inputs.target_savings = 10_000.0;
    let mut again = engine.recalculate_inputs(&inputs, as_of());
    assert_eq!(again.apply_dismissals(&dismissed), 3);
    assert_eq!(again.active_alerts().count(), 0);

    // Going negative is a new condition and resurfaces
    inputs.current_balance = -20.0;
    let mut worse = engine.recalculate_inputs(&inputs, as_of());
    assert_eq!(worse.apply_dismissals(&dismissed), 0);
    assert_eq!(worse.active_alerts().count(), 3);
}

#[test]
fn test_snapshot_bootstrap_with_malformed_records() {
    let snapshot = r#"{
        "currentBalance": 8000,
        "lowCashThreshold": 5000,
        "targetSavings": 20000,
        "forecastMonths": 6,
        "incomeSources": [
            {"id": "i1", "name": "Retainer", "kind": "recurring", "amount": 3000, "frequency": "monthly", "confidence": 100},
            {"id": "i2", "name": "Mystery", "kind": "recurring", "amount": 999, "frequency": "biweekly", "confidence": 100},
            {"id": "i3", "name": "Blank", "kind": "variable", "confidence": 50}
        ],
        "expenses": [
            {"id": "e1", "name": "Payroll", "kind": "fixed", "amount": 3500, "frequency": "monthly", "category": "Team"}
        ]
    }"#;

    let inputs = PulseInputs::from_json(snapshot).unwrap();
    let report = PulseEngine::new().recalculate_inputs(&inputs, as_of());

    assert_eq!(report.forecasts.len(), 6);
    assert!(report.forecasts.iter().all(|f| f.net_cash_flow == -500));
    assert_eq!(report.forecasts[5].running_balance, 5000);
    // Balances 7500 .. 5500 are above 5000; 5000 itself is not below it
    assert_eq!(low_cash_count(&report), 0);

    let summary = ForecastSummary::from_forecasts(&report.forecasts, inputs.target_savings);
    assert_eq!(summary.ending_balance, Some(5000));
    assert_eq!(summary.target_reached_month, None);
    assert!(!summary.has_shortfall());
}

#[test]
fn test_engine_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<PulseEngine>();
    assert_send_sync::<PulseReport>();
    assert_send_sync::<PulseConfig>();
    assert_send_sync::<AlertGenerator>();
    assert_send_sync::<ForecastProjector>();
    assert_send_sync::<PulseInputs>();
}
