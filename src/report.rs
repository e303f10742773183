//! Plain-text rendering of a [`DepositResult`].
//!
//! The summary is meant for terminals, e-mails and the `text/plain`
//! API endpoint.  Amounts are formatted in German euro notation and
//! dates as `DD.MM.YYYY`.

use crate::models::DepositResult;
use crate::money::{format_date, format_eur};
use std::fmt::Write;

/// Render `result` as a multi-line German summary.
pub fn render_summary(result: &DepositResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, result);
    out
}

fn write_summary(out: &mut String, result: &DepositResult) -> std::fmt::Result {
    writeln!(out, "Mietkaution: {}", format_eur(result.deposit_amount))?;
    writeln!(
        out,
        "  {} Monatsmiete(n) à {}",
        result.capped_months.normalize(),
        format_eur(result.base_rent)
    )?;
    writeln!(
        out,
        "  Gesetzliches Maximum (§551 BGB): {}",
        format_eur(result.statutory_max_amount)
    )?;
    if let Some(gross_rent) = result.gross_rent {
        writeln!(out, "  Warmmiete (informativ): {}", format_eur(gross_rent))?;
    }
    if result.exceeds_statutory_limit {
        writeln!(
            out,
            "  ACHTUNG: Kaution zu hoch, {} über dem gesetzlichen Maximum",
            format_eur(result.overpayment_amount)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Ratenzahlung:")?;
    for line in result.installments.iter() {
        writeln!(
            out,
            "  {}. Rate  {}  fällig {}",
            line.index,
            format_eur(line.amount),
            format_date(line.due_date)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Kautionsart: {}", result.deposit_type_label)?;
    if result.annual_fee_amount.is_zero() || !result.annual_interest_amount.is_zero() {
        writeln!(out, "  Zinsen/Jahr: +{}", format_eur(result.annual_interest_amount))?;
    }
    if !result.annual_fee_amount.is_zero() {
        writeln!(out, "  Kosten/Jahr: -{}", format_eur(result.annual_fee_amount))?;
    }
    writeln!(
        out,
        "  Wert nach 5 Jahren: {} (Zinsen +{}, Kosten -{})",
        format_eur(result.five_year_projected_value),
        format_eur(result.five_year_interest_total),
        format_eur(result.five_year_fee_total)
    )?;

    writeln!(out)?;
    writeln!(out, "Empfehlung: {}", result.recommendation)
}
