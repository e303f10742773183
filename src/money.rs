//! Rounding policy and display formatting for euro amounts.
//!
//! Amounts are rounded to cents with [`RoundingStrategy::MidpointAwayFromZero`]
//! (commercial rounding: `0.005` becomes `0.01`, `-0.005` becomes
//! `-0.01`).  Formatting follows the German convention: `.` groups
//! thousands, `,` separates cents and the euro sign trails the amount.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits kept on monetary output.
pub const MONEY_SCALE: u32 = 2;

/// Round `value` to cents and fix its scale at two digits, so `2400`
/// serializes as `"2400.00"`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// Format an amount as German euro text, e.g. `2.400,00 €`.
pub fn format_eur(value: Decimal) -> String {
    let rounded = round_money(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}{},{} €", if negative { "-" } else { "" }, grouped, cents)
}

/// Format a date the German way, e.g. `01.02.2025`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
