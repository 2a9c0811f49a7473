//! Alerts command implementation

use std::collections::HashSet;

use anyhow::Result;
use chrono::NaiveDate;
use pulse_core::{AlertSeverity, AlertType, PulseEngine, PulseInputs};

pub fn cmd_alerts(
    engine: &PulseEngine,
    inputs: &PulseInputs,
    as_of: NaiveDate,
    dismissed: &[String],
    include_dismissed: bool,
    json: bool,
) -> Result<()> {
    let mut report = engine.recalculate_inputs(inputs, as_of);
    let dismissed: HashSet<String> = dismissed.iter().cloned().collect();
    let marked = report.apply_dismissals(&dismissed);
    tracing::debug!(dismissed = marked, "Applied dismissals");

    let shown: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| include_dismissed || !a.dismissed)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("✅ No active alerts. Cash flow looks healthy!");
        return Ok(());
    }

    println!();
    println!("⚠️  Alerts");
    println!("   ─────────────────────────────────────────────────────────────");

    for alert in shown {
        let type_icon = match alert.alert_type {
            AlertType::LowCash => "🪫",
            AlertType::ExpenseSpike => "📈",
            AlertType::Opportunity => "💡",
        };
        let severity_mark = match alert.severity {
            AlertSeverity::Critical => " [critical]",
            AlertSeverity::Warning => " [warning]",
            AlertSeverity::Info => "",
        };
        let dismissed_mark = if alert.dismissed { " (dismissed)" } else { "" };

        println!(
            "   {} {}{}{}",
            type_icon, alert.title, severity_mark, dismissed_mark
        );
        println!("      {}", alert.message);
        println!("      id: {}", alert.id);
        println!();
    }

    Ok(())
}
