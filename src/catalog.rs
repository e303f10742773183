//! Deposit type catalog.
//!
//! The `catalog` module holds the compiled-in table of ways a rental
//! deposit can be held, together with their yearly interest or fee.
//! Whether a type earns interest or costs a fee is plain data on the
//! [`DepositTypeOption`]; the engine reads whichever attribute is set.

use crate::models::DepositTypeId;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// A way of holding the deposit and its financial attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepositTypeOption {
    pub id: DepositTypeId,
    pub label: &'static str,
    /// Yearly interest credited to the tenant, in percent.  Only set
    /// for interest-bearing types.
    pub annual_interest_rate_percent: Option<Decimal>,
    /// Yearly cost charged to the tenant, in percent of the deposit.
    /// Only set for fee-charging types.
    pub annual_fee_percent: Option<Decimal>,
    pub description: &'static str,
}

/// The built-in catalog.  Order matters: the first entry is the
/// fallback for unresolved type ids.
pub static DEPOSIT_TYPES: [DepositTypeOption; 4] = [
    DepositTypeOption {
        id: DepositTypeId::BankEscrowAccount,
        label: "Mietkautionskonto (Bank)",
        annual_interest_rate_percent: Some(dec!(0.5)),
        annual_fee_percent: None,
        description: "Dedicated deposit account at a bank. The interest belongs to the tenant.",
    },
    DepositTypeOption {
        id: DepositTypeId::SuretyBond,
        label: "Kautionsbürgschaft",
        annual_interest_rate_percent: None,
        annual_fee_percent: Some(dec!(5)),
        description: "Surety bond from an insurer. No capital tied up, but a yearly fee.",
    },
    DepositTypeOption {
        id: DepositTypeId::PledgedSavingsBook,
        label: "Sparbuch (verpfändet)",
        annual_interest_rate_percent: Some(dec!(0.01)),
        annual_fee_percent: None,
        description: "Savings book of the tenant pledged to the landlord. Very low interest.",
    },
    DepositTypeOption {
        id: DepositTypeId::CashPayment,
        label: "Barzahlung (nicht empfohlen)",
        annual_interest_rate_percent: Some(dec!(0)),
        annual_fee_percent: None,
        description: "Cash paid to the landlord. No interest and legally problematic.",
    },
];

/// Look up `id` in `catalog`.
pub fn find(catalog: &[DepositTypeOption], id: DepositTypeId) -> Option<&DepositTypeOption> {
    catalog.iter().find(|option| option.id == id)
}

/// Resolve the option to calculate with.
///
/// A missing id, or one not present in `catalog`, resolves to the
/// first catalog entry.  An empty catalog resolves against the
/// built-in [`DEPOSIT_TYPES`], so this never fails.
pub fn resolve(catalog: &[DepositTypeOption], id: Option<DepositTypeId>) -> &DepositTypeOption {
    let catalog: &[DepositTypeOption] = if catalog.is_empty() {
        &DEPOSIT_TYPES
    } else {
        catalog
    };
    match id.and_then(|id| find(catalog, id)) {
        Some(option) => option,
        None => {
            if let Some(id) = id {
                tracing::warn!(
                    "deposit type {} not in catalog, using {}",
                    id,
                    catalog[0].id
                );
            }
            &catalog[0]
        }
    }
}
