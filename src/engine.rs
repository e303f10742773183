//! Deposit computation engine.
//!
//! The `engine` module turns [`DepositInputs`] into a
//! [`DepositResult`].  [`compute`] is a pure function: it reads only
//! its arguments, keeps no state between calls and cannot fail, so it
//! is safe to call from any number of threads at once.  The batch
//! helpers use [`rayon`] to spread independent calculations across
//! CPU cores.

use crate::calendar::add_months;
use crate::catalog::{resolve, DepositTypeOption, DEPOSIT_TYPES};
use crate::models::{
    DepositInputs, DepositResult, DepositTypeId, InstallmentLine, Recommendation,
    INSTALLMENT_COUNT, STATUTORY_MAX_MONTHS,
};
use crate::money::round_money;
use rayon::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Years covered by the value projection.
pub const PROJECTION_YEARS: Decimal = dec!(5);

/// Net rent above which a surety bond is recommended.
pub const SURETY_BOND_RENT_THRESHOLD: Decimal = dec!(1000);

const ONE_HUNDRED: Decimal = dec!(100);

/// Compute the deposit breakdown for `inputs` against `catalog`.
///
/// All intermediate values stay unrounded; monetary outputs are
/// rounded to cents only when the result is assembled.
pub fn compute(inputs: DepositInputs, catalog: &[DepositTypeOption]) -> DepositResult {
    let DepositInputs {
        base_rent,
        gross_rent,
        agreed_deposit_multiple,
        tenancy_start_date,
        deposit_type_id,
    } = inputs;

    let deposit_type = resolve(catalog, deposit_type_id);

    let statutory_max_amount = base_rent.saturating_mul(STATUTORY_MAX_MONTHS);
    let capped_months = agreed_deposit_multiple.min(STATUTORY_MAX_MONTHS);
    let deposit_amount = base_rent.saturating_mul(capped_months);

    // Overpayment is measured on the uncapped multiple.
    let exceeds_statutory_limit = agreed_deposit_multiple > STATUTORY_MAX_MONTHS;
    let overpayment_amount = if exceeds_statutory_limit {
        (agreed_deposit_multiple - STATUTORY_MAX_MONTHS).saturating_mul(base_rent)
    } else {
        Decimal::ZERO
    };

    let installment_amount = deposit_amount / Decimal::from(INSTALLMENT_COUNT);
    let installments = [1, 2, 3].map(|index| InstallmentLine {
        index,
        amount: round_money(installment_amount),
        due_date: add_months(tenancy_start_date, index - 1),
    });

    let annual_interest_amount = deposit_type
        .annual_interest_rate_percent
        .map(|rate| deposit_amount.saturating_mul(rate / ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);
    let annual_fee_amount = deposit_type
        .annual_fee_percent
        .map(|fee| deposit_amount.saturating_mul(fee / ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO);

    let five_year_interest_total = annual_interest_amount.saturating_mul(PROJECTION_YEARS);
    let five_year_fee_total = annual_fee_amount.saturating_mul(PROJECTION_YEARS);
    let five_year_projected_value = deposit_amount
        .saturating_add(five_year_interest_total)
        .saturating_sub(five_year_fee_total);

    let recommendation = recommend(deposit_type.id, base_rent);

    tracing::debug!(
        deposit_type = %deposit_type.id,
        exceeds_statutory_limit,
        "computed deposit of {} for base rent {}",
        deposit_amount,
        base_rent
    );

    DepositResult {
        base_rent,
        gross_rent,
        statutory_max_amount: round_money(statutory_max_amount),
        deposit_amount: round_money(deposit_amount),
        capped_months,
        exceeds_statutory_limit,
        overpayment_amount: round_money(overpayment_amount),
        installments,
        first_installment_amount: round_money(installment_amount),
        deposit_type_id: deposit_type.id,
        deposit_type_label: deposit_type.label.to_string(),
        annual_interest_amount: round_money(annual_interest_amount),
        annual_fee_amount: round_money(annual_fee_amount),
        five_year_interest_total: round_money(five_year_interest_total),
        five_year_fee_total: round_money(five_year_fee_total),
        five_year_projected_value: round_money(five_year_projected_value),
        recommendation,
    }
}

/// [`compute`] against the built-in [`DEPOSIT_TYPES`].
pub fn compute_standard(inputs: DepositInputs) -> DepositResult {
    compute(inputs, &DEPOSIT_TYPES)
}

/// Pick the advice for the resolved deposit type.
pub fn recommend(deposit_type: DepositTypeId, base_rent: Decimal) -> Recommendation {
    match deposit_type {
        DepositTypeId::SuretyBond if base_rent > SURETY_BOND_RENT_THRESHOLD => {
            Recommendation::SuretyBondWorthwhile
        }
        DepositTypeId::CashPayment => Recommendation::CashDiscouraged,
        _ => Recommendation::EscrowAccountSafest,
    }
}

/// Compute `inputs` once for every entry of `catalog`, in catalog
/// order, so the holding options can be shown side by side.
pub fn compare_deposit_types(
    inputs: &DepositInputs,
    catalog: &[DepositTypeOption],
) -> Vec<DepositResult> {
    catalog
        .par_iter()
        .map(|option| {
            let scenario = DepositInputs {
                deposit_type_id: Some(option.id),
                ..inputs.clone()
            };
            compute(scenario, catalog)
        })
        .collect()
}

/// Compute many independent scenarios in parallel.  Results are in
/// the same order as `inputs`.
pub fn compute_batch(
    inputs: Vec<DepositInputs>,
    catalog: &[DepositTypeOption],
) -> Vec<DepositResult> {
    inputs
        .into_par_iter()
        .map(|scenario| compute(scenario, catalog))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inputs(base_rent: Decimal, multiple: Decimal, id: DepositTypeId) -> DepositInputs {
        DepositInputs {
            base_rent,
            gross_rent: None,
            agreed_deposit_multiple: multiple,
            tenancy_start_date: ymd(2025, 1, 1),
            deposit_type_id: Some(id),
        }
    }

    #[test]
    fn test_bank_escrow_scenario() {
        let result = compute_standard(inputs(dec!(800), dec!(3), DepositTypeId::BankEscrowAccount));
        assert_eq!(result.deposit_amount, dec!(2400.00));
        assert_eq!(result.statutory_max_amount, dec!(2400.00));
        assert_eq!(result.first_installment_amount, dec!(800.00));
        let due: Vec<NaiveDate> = result.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(due, vec![ymd(2025, 1, 1), ymd(2025, 2, 1), ymd(2025, 3, 1)]);
        assert_eq!(result.annual_interest_amount, dec!(12.00));
        assert_eq!(result.annual_fee_amount, Decimal::ZERO);
        assert_eq!(result.five_year_interest_total, dec!(60.00));
        assert_eq!(result.five_year_projected_value, dec!(2460.00));
        assert_eq!(result.deposit_type_label, "Mietkautionskonto (Bank)");
        assert_eq!(result.recommendation, Recommendation::EscrowAccountSafest);
        assert!(!result.exceeds_statutory_limit);
    }

    #[test]
    fn test_multiple_above_cap_is_flagged() {
        let result = compute_standard(inputs(dec!(800), dec!(5), DepositTypeId::BankEscrowAccount));
        assert!(result.exceeds_statutory_limit);
        assert_eq!(result.capped_months, dec!(3));
        assert_eq!(result.deposit_amount, dec!(2400.00));
        assert_eq!(result.overpayment_amount, dec!(1600.00));
    }

    #[test]
    fn test_surety_bond_at_high_rent() {
        let result = compute_standard(inputs(dec!(1200), dec!(3), DepositTypeId::SuretyBond));
        assert_eq!(result.deposit_amount, dec!(3600.00));
        assert_eq!(result.annual_fee_amount, dec!(180.00));
        assert_eq!(result.annual_interest_amount, Decimal::ZERO);
        assert_eq!(result.five_year_fee_total, dec!(900.00));
        assert_eq!(result.five_year_projected_value, dec!(2700.00));
        assert_eq!(result.recommendation, Recommendation::SuretyBondWorthwhile);
    }

    #[test]
    fn test_surety_bond_at_threshold_rent_gets_default_advice() {
        let result = compute_standard(inputs(dec!(1000), dec!(3), DepositTypeId::SuretyBond));
        assert_eq!(result.recommendation, Recommendation::EscrowAccountSafest);
    }

    #[test]
    fn test_cash_payment_is_discouraged() {
        let result = compute_standard(inputs(dec!(1200), dec!(3), DepositTypeId::CashPayment));
        assert_eq!(result.recommendation, Recommendation::CashDiscouraged);
        assert_eq!(result.annual_interest_amount, Decimal::ZERO);
        assert_eq!(result.five_year_projected_value, dec!(3600.00));
    }

    #[test]
    fn test_within_cap_is_not_flagged() {
        for multiple in [dec!(0), dec!(1), dec!(1.5), dec!(2), dec!(2.75), dec!(3)] {
            let result =
                compute_standard(inputs(dec!(730.40), multiple, DepositTypeId::PledgedSavingsBook));
            assert!(!result.exceeds_statutory_limit);
            assert_eq!(result.overpayment_amount, Decimal::ZERO);
            assert_eq!(result.capped_months, multiple);
            assert_eq!(result.deposit_amount, round_money(dec!(730.40) * multiple));
        }
    }

    #[test]
    fn test_fractional_multiple_above_cap() {
        let result = compute_standard(inputs(dec!(1000), dec!(3.5), DepositTypeId::BankEscrowAccount));
        assert!(result.exceeds_statutory_limit);
        assert_eq!(result.deposit_amount, dec!(3000.00));
        assert_eq!(result.overpayment_amount, dec!(500.00));
    }

    #[test]
    fn test_installments_sum_within_one_cent() {
        let result = compute_standard(inputs(dec!(333.33), dec!(3), DepositTypeId::BankEscrowAccount));
        let sum: Decimal = result.installments.iter().map(|i| i.amount).sum();
        assert!((sum - result.deposit_amount).abs() <= dec!(0.01));
        assert_eq!(
            result.installments.map(|i| i.index),
            [1, 2, 3]
        );

        let result = compute_standard(inputs(dec!(100), dec!(1), DepositTypeId::BankEscrowAccount));
        assert_eq!(result.first_installment_amount, dec!(33.33));
        let sum: Decimal = result.installments.iter().map(|i| i.amount).sum();
        assert!((sum - result.deposit_amount).abs() <= dec!(0.01));
    }

    #[test]
    fn test_due_dates_clamp_at_month_end() {
        let mut scenario = inputs(dec!(900), dec!(3), DepositTypeId::BankEscrowAccount);
        scenario.tenancy_start_date = ymd(2025, 1, 31);
        let result = compute_standard(scenario);
        let due: Vec<NaiveDate> = result.installments.iter().map(|i| i.due_date).collect();
        assert_eq!(due, vec![ymd(2025, 1, 31), ymd(2025, 2, 28), ymd(2025, 3, 31)]);
    }

    #[test]
    fn test_type_without_interest_or_fee_keeps_deposit_value() {
        let catalog = [DepositTypeOption {
            id: DepositTypeId::PledgedSavingsBook,
            label: "Plain",
            annual_interest_rate_percent: None,
            annual_fee_percent: None,
            description: "",
        }];
        let result = compute(inputs(dec!(650), dec!(2), DepositTypeId::PledgedSavingsBook), &catalog);
        assert_eq!(result.five_year_projected_value, result.deposit_amount);
        assert_eq!(result.five_year_projected_value, dec!(1300.00));
    }

    #[test]
    fn test_interest_and_fee_both_apply() {
        let catalog = [DepositTypeOption {
            id: DepositTypeId::BankEscrowAccount,
            label: "Mixed",
            annual_interest_rate_percent: Some(dec!(1)),
            annual_fee_percent: Some(dec!(0.5)),
            description: "",
        }];
        let result = compute(inputs(dec!(1000), dec!(3), DepositTypeId::BankEscrowAccount), &catalog);
        assert_eq!(result.annual_interest_amount, dec!(30.00));
        assert_eq!(result.annual_fee_amount, dec!(15.00));
        assert_eq!(result.five_year_projected_value, dec!(3075.00));
    }

    #[test]
    fn test_unresolved_type_falls_back_to_first_entry() {
        let mut scenario = inputs(dec!(800), dec!(3), DepositTypeId::BankEscrowAccount);
        scenario.deposit_type_id = None;
        let result = compute_standard(scenario);
        assert_eq!(result.deposit_type_id, DepositTypeId::BankEscrowAccount);

        let catalog = [DEPOSIT_TYPES[1]];
        let result = compute(inputs(dec!(800), dec!(3), DepositTypeId::CashPayment), &catalog);
        assert_eq!(result.deposit_type_id, DepositTypeId::SuretyBond);
        assert_eq!(result.annual_fee_amount, dec!(120.00));
    }

    #[test]
    fn test_zero_and_negative_rent_propagate() {
        let result = compute_standard(inputs(Decimal::ZERO, dec!(3), DepositTypeId::BankEscrowAccount));
        assert_eq!(result.deposit_amount, Decimal::ZERO);
        assert_eq!(result.first_installment_amount, Decimal::ZERO);
        assert_eq!(result.five_year_projected_value, Decimal::ZERO);

        let result = compute_standard(inputs(dec!(-100), dec!(3), DepositTypeId::BankEscrowAccount));
        assert_eq!(result.deposit_amount, dec!(-300.00));
    }

    #[test]
    fn test_rounds_only_at_output() {
        // 0.01 % of 1040 is 0.104 a year.  Five years of the unrounded
        // value is 0.52; rounding the yearly value first would give 0.50.
        let result = compute_standard(inputs(dec!(520), dec!(2), DepositTypeId::PledgedSavingsBook));
        assert_eq!(result.annual_interest_amount, dec!(0.10));
        assert_eq!(result.five_year_interest_total, dec!(0.52));
        assert_eq!(result.five_year_projected_value, dec!(1040.52));
    }

    #[test]
    fn test_gross_rent_is_echoed_only() {
        let mut scenario = inputs(dec!(800), dec!(3), DepositTypeId::BankEscrowAccount);
        scenario.gross_rent = Some(dec!(1050));
        let with_gross = compute_standard(scenario.clone());
        scenario.gross_rent = None;
        let without_gross = compute_standard(scenario);
        assert_eq!(with_gross.gross_rent, Some(dec!(1050)));
        assert_eq!(with_gross.deposit_amount, without_gross.deposit_amount);
        assert_eq!(with_gross.five_year_projected_value, without_gross.five_year_projected_value);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let scenario = inputs(dec!(987.65), dec!(2.5), DepositTypeId::SuretyBond);
        assert_eq!(compute_standard(scenario.clone()), compute_standard(scenario));
    }

    #[test]
    fn test_compare_deposit_types_keeps_catalog_order() {
        let scenario = inputs(dec!(1200), dec!(3), DepositTypeId::CashPayment);
        let results = compare_deposit_types(&scenario, &DEPOSIT_TYPES);
        let ids: Vec<DepositTypeId> = results.iter().map(|r| r.deposit_type_id).collect();
        assert_eq!(ids, DEPOSIT_TYPES.iter().map(|o| o.id).collect::<Vec<_>>());
        assert_eq!(results[1].annual_fee_amount, dec!(180.00));
        assert!(results.iter().all(|r| r.deposit_amount == dec!(3600.00)));
    }

    #[test]
    fn test_compute_batch_preserves_order() {
        let batch = vec![
            inputs(dec!(500), dec!(3), DepositTypeId::BankEscrowAccount),
            inputs(dec!(800), dec!(5), DepositTypeId::SuretyBond),
            inputs(dec!(1500), dec!(2), DepositTypeId::CashPayment),
        ];
        let results = compute_batch(batch, &DEPOSIT_TYPES);
        let deposits: Vec<Decimal> = results.iter().map(|r| r.deposit_amount).collect();
        assert_eq!(deposits, vec![dec!(1500), dec!(2400), dec!(3000)]);
        assert!(results[1].exceeds_statutory_limit);
    }
}
