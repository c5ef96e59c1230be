//! Slack message rendering
//!
//! Turns a performance snapshot into an ephemeral Slack message with three
//! attachments: cumulative returns (green or red), yesterday's return, and the
//! account totals.

use serde::{Deserialize, Serialize};

use crate::indexa::PerformanceMetrics;
use crate::utils::{format_euros, format_percent};

pub const COLOR_GAIN: &str = "#47bc2d";
pub const COLOR_LOSS: &str = "#bc2d2d";
pub const COLOR_DAILY: &str = "#804de1";
pub const COLOR_TOTALS: &str = "#96beff";

/// Message visible only to the user who triggered it
pub const RESPONSE_TYPE_EPHEMERAL: &str = "ephemeral";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub response_type: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl Field {
    fn new(title: &str, value: String) -> Self {
        Self {
            title: title.to_string(),
            value,
            short: false,
        }
    }
}

impl Attachment {
    fn new(color: &str, fields: Vec<Field>) -> Self {
        Self {
            color: color.to_string(),
            fields,
        }
    }
}

/// Color of the returns block: zero counts as a gain
pub fn return_color(time_return: f64) -> &'static str {
    if time_return < 0.0 {
        COLOR_LOSS
    } else {
        COLOR_GAIN
    }
}

fn cumulative(total: f64, annual: f64) -> String {
    format!(
        "{} acumulada ({} TAE)",
        format_percent(total, 1),
        format_percent(annual, 1)
    )
}

/// Render the Slack message for a performance snapshot
pub fn render(metrics: &PerformanceMetrics) -> MessagePayload {
    let returns = Attachment::new(
        return_color(metrics.time_return),
        vec![
            Field::new(
                "Rentabilidad por dinero",
                cumulative(metrics.money_return, metrics.money_return_annual),
            ),
            Field::new(
                "Rentabilidad por tiempo",
                cumulative(metrics.time_return, metrics.time_return_annual),
            ),
        ],
    );

    // The brokerage exposes no daily figure; the annualized money return stands in
    let daily = Attachment::new(
        COLOR_DAILY,
        vec![Field::new(
            "Rentabilidad ayer",
            format_percent(metrics.money_return_annual, 1),
        )],
    );

    let totals = Attachment::new(
        COLOR_TOTALS,
        vec![
            Field::new("Aportaciones", format_euros(metrics.investment)),
            Field::new("Rentabilidad", format_euros(metrics.profit_loss)),
            Field::new("Valor total", format_euros(metrics.total_amount)),
            Field::new("Volatilidad", format_percent(metrics.volatility, 2)),
        ],
    );

    MessagePayload {
        response_type: RESPONSE_TYPE_EPHEMERAL.to_string(),
        attachments: vec![returns, daily, totals],
    }
}
