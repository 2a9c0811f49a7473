//! Summary command implementation

use anyhow::Result;
use chrono::NaiveDate;
use pulse_core::pulse::{format_currency, CashFlowItem};
use pulse_core::{ForecastSummary, PulseEngine, PulseInputs};

use super::truncate;

pub fn cmd_summary(
    engine: &PulseEngine,
    inputs: &PulseInputs,
    as_of: NaiveDate,
    json: bool,
) -> Result<()> {
    let report = engine.recalculate_inputs(inputs, as_of);
    let summary = ForecastSummary::from_forecasts(&report.forecasts, inputs.target_savings);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│            💓 Pulse Summary             │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Horizon:          {} months", summary.months);
    println!(
        "  Current balance:  {}",
        format_currency(inputs.current_balance)
    );
    if let Some(ending) = summary.ending_balance {
        println!("  Ending balance:   {}", format_currency(ending as f64));
    }
    if let (Some(lowest), Some(month)) = (summary.lowest_balance, summary.lowest_balance_month) {
        println!(
            "  Lowest balance:   {} ({})",
            format_currency(lowest as f64),
            month.label()
        );
    }
    println!(
        "  Avg net / month:  {}",
        format_currency(summary.average_net_cash_flow)
    );
    println!();

    match (summary.runway_months, summary.first_negative_month) {
        (Some(runway), Some(month)) => {
            println!("  🔥 Runway: {} month(s), cash runs out in {}", runway, month.label());
        }
        _ => println!("  ✅ Balance stays positive through the horizon"),
    }

    if summary.target_savings > 0.0 {
        match summary.target_reached_month {
            Some(month) => println!(
                "  🎯 Savings target {} reached in {}",
                format_currency(summary.target_savings),
                month.label()
            ),
            None => println!(
                "  🎯 Savings target {} not reached within the horizon",
                format_currency(summary.target_savings)
            ),
        }
    }

    if let Some(confidence) = summary.min_confidence {
        println!("  Confidence floor: {}%", confidence);
    }

    let skipped: Vec<_> = inputs
        .income_sources
        .iter()
        .filter(|s| s.cadence().is_err())
        .map(|s| truncate(&s.name, 24))
        .chain(
            inputs
                .expenses
                .iter()
                .filter(|e| e.cadence().is_err())
                .map(|e| truncate(&e.name, 24)),
        )
        .collect();
    if !skipped.is_empty() {
        println!();
        println!("  ⚠️  Not counted (incomplete records): {}", skipped.join(", "));
    }

    println!();
    Ok(())
}
