//! Utility functions for formatting numbers
//!
//! The message payload uses a fixed, locale-free format (`8.0%`, `1050.00€`);
//! the terminal view uses Spanish locale conventions (`1.050,00 €`).

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to cents, half away from zero (as printf's `%.2f` does).
///
/// An amount that rounds to zero loses its sign.
pub fn round_cents(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Format a fractional value as a percentage with `decimals` places.
///
/// # Examples
/// ```
/// use inbot::utils::format_percent;
///
/// assert_eq!(format_percent(0.085, 1), "8.5%");
/// assert_eq!(format_percent(0.12, 2), "12.00%");
/// assert_eq!(format_percent(-0.02, 1), "-2.0%");
/// ```
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Format an amount in euros with two decimals and a suffixed symbol.
///
/// # Examples
/// ```
/// use inbot::utils::format_euros;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_euros(dec!(1050)), "1050.00€");
/// assert_eq!(format_euros(dec!(-12.5)), "-12.50€");
/// assert_eq!(format_euros(dec!(1050.126)), "1050.13€");
/// ```
pub fn format_euros(amount: Decimal) -> String {
    format!("{:.2}€", round_cents(amount))
}

/// Format an amount with Spanish locale conventions:
/// - Thousands separator: `.` (period)
/// - Decimal separator: `,` (comma)
///
/// # Examples
/// ```
/// use inbot::utils::format_euros_es;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_euros_es(dec!(1234.56)), "1.234,56 €");
/// assert_eq!(format_euros_es(dec!(-500)), "-500,00 €");
/// ```
pub fn format_euros_es(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let is_negative = rounded < Decimal::ZERO;

    let formatted = format!("{:.2}", rounded.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    // Add thousands separators (.) to integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec!['.', c]
            } else {
                vec![c]
            }
        })
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let sign = if is_negative { "-" } else { "" };
    format!("{}{},{} €", sign, with_separators, decimal_part)
}

/// Format a fractional value as a Spanish-locale percentage: "8,50 %"
///
/// # Examples
/// ```
/// use inbot::utils::format_percent_es;
///
/// assert_eq!(format_percent_es(0.085), "8,50 %");
/// ```
pub fn format_percent_es(fraction: f64) -> String {
    format!("{:.2} %", fraction * 100.0).replace('.', ",")
}
