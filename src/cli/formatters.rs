//! Output formatting module for CLI display
//!
//! Terminal rendering of a performance snapshot, separate from the Slack
//! message the handler produces.

use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use inbot::indexa::PerformanceMetrics;
use inbot::utils::{format_euros_es, format_percent_es};

fn signed(text: String, negative: bool) -> ColoredString {
    if negative {
        text.red()
    } else {
        text.green()
    }
}

/// Format a performance snapshot for terminal table output
pub fn format_performance_table(metrics: &PerformanceMetrics) -> String {
    #[derive(Tabled)]
    struct ReturnRow {
        #[tabled(rename = "Return")]
        label: String,
        #[tabled(rename = "Cumulative")]
        cumulative: String,
        #[tabled(rename = "Annualized")]
        annual: String,
    }

    let row = |label: &str, total: f64, annual: f64| ReturnRow {
        label: label.to_string(),
        cumulative: signed(format_percent_es(total), total < 0.0).to_string(),
        annual: signed(format_percent_es(annual), annual < 0.0).to_string(),
    };

    let rows = vec![
        row("By money", metrics.money_return, metrics.money_return_annual),
        row("By time", metrics.time_return, metrics.time_return_annual),
    ];

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    table.modify(Columns::new(1..), Alignment::right());

    let mut output = format!("\n{} Indexa Capital performance\n\n", "📈".cyan().bold());
    output.push_str(&table.to_string());

    output.push_str(&format!("\n\n{} Summary", "━".repeat(60).bright_black()));
    output.push_str(&format!(
        "\n{:<20} {}",
        "Contributions:".bold(),
        format_euros_es(metrics.investment)
    ));
    output.push_str(&format!(
        "\n{:<20} {}",
        "Profit/Loss:".bold(),
        signed(
            format_euros_es(metrics.profit_loss),
            metrics.profit_loss < Decimal::ZERO
        )
    ));
    output.push_str(&format!(
        "\n{:<20} {}",
        "Total Value:".bold(),
        format_euros_es(metrics.total_amount)
    ));
    output.push_str(&format!(
        "\n{:<20} {}\n",
        "Volatility:".bold(),
        format_percent_es(metrics.volatility)
    ));

    output
}

/// Format a performance snapshot as pretty JSON
pub fn format_performance_json(metrics: &PerformanceMetrics) -> String {
    serde_json::to_string_pretty(metrics)
        .unwrap_or_else(|e| format!(r#"{{"error": "JSON serialization failed: {}"}}"#, e))
}
