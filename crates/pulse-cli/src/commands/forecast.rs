//! Forecast command implementation

use anyhow::Result;
use chrono::NaiveDate;
use pulse_core::pulse::format_currency;
use pulse_core::{PulseEngine, PulseInputs};

pub fn cmd_forecast(
    engine: &PulseEngine,
    inputs: &PulseInputs,
    as_of: NaiveDate,
    json: bool,
) -> Result<()> {
    let report = engine.recalculate_inputs(inputs, as_of);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.forecasts)?);
        return Ok(());
    }

    if report.forecasts.is_empty() {
        println!("No forecast: the horizon is zero months.");
        return Ok(());
    }

    println!();
    println!("📈 Cash Flow Forecast");
    println!(
        "   Starting balance: {}",
        format_currency(inputs.current_balance)
    );
    println!("   ─────────────────────────────────────────────────────────────────────");
    println!(
        "   {:<16} {:>12} {:>12} {:>12} {:>12} {:>6}",
        "Month", "Income", "Expenses", "Net", "Balance", "Conf."
    );

    for f in &report.forecasts {
        let marker = if f.running_balance < 0 { " ⚠️" } else { "" };
        println!(
            "   {:<16} {:>12} {:>12} {:>12} {:>12} {:>5}%{}",
            f.month.label(),
            format_currency(f.predicted_income as f64),
            format_currency(f.predicted_expenses as f64),
            format_currency(f.net_cash_flow as f64),
            format_currency(f.running_balance as f64),
            f.confidence,
            marker
        );
    }

    println!();
    if !report.alerts.is_empty() {
        println!(
            "  {} alert(s). Run 'pulse alerts' to see what needs attention.",
            report.alerts.len()
        );
    }

    Ok(())
}
