//! Data models for the Kaution Engine.
//!
//! The `models` module defines the serialisable input and output
//! records of a deposit calculation.  Inputs derive `Deserialize` so
//! they can be accepted straight from a JSON request body; results
//! derive `Serialize` so they can be returned the same way.  Monetary
//! values are [`Decimal`]s and dates are [`NaiveDate`]s.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum number of monthly net rents a landlord may demand as
/// deposit (§551 BGB).
pub const STATUTORY_MAX_MONTHS: Decimal = dec!(3);

/// Number of installments the tenant may split the deposit into.
pub const INSTALLMENT_COUNT: u32 = 3;

/// Identifies one of the ways a deposit can be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepositTypeId {
    /// Dedicated deposit account at a bank, interest belongs to the tenant.
    BankEscrowAccount,
    /// Surety bond issued by an insurer; no capital tied up, yearly fee.
    SuretyBond,
    /// Savings book in the tenant's name, pledged to the landlord.
    PledgedSavingsBook,
    /// Cash handed to the landlord.
    CashPayment,
}

impl DepositTypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepositTypeId::BankEscrowAccount => "bank-escrow-account",
            DepositTypeId::SuretyBond => "surety-bond",
            DepositTypeId::PledgedSavingsBook => "pledged-savings-book",
            DepositTypeId::CashPayment => "cash-payment",
        }
    }
}

impl fmt::Display for DepositTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known deposit type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deposit type `{0}`")]
pub struct UnknownDepositType(pub String);

impl FromStr for DepositTypeId {
    type Err = UnknownDepositType;

    /// Accepts the kebab-case ids as well as the German ids used by
    /// older clients (`sparkonto`, `buergschaft`, `sparbuch`,
    /// `barzahlung`).  Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bank-escrow-account" | "sparkonto" => Ok(DepositTypeId::BankEscrowAccount),
            "surety-bond" | "buergschaft" => Ok(DepositTypeId::SuretyBond),
            "pledged-savings-book" | "sparbuch" => Ok(DepositTypeId::PledgedSavingsBook),
            "cash-payment" | "barzahlung" => Ok(DepositTypeId::CashPayment),
            _ => Err(UnknownDepositType(s.to_string())),
        }
    }
}

/// Input to the deposit calculator.
///
/// Optional fields absorb missing values: an absent multiple means the
/// statutory three months, and an absent or unrecognised deposit type
/// resolves to the first catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositInputs {
    /// Net monthly rent (Nettokaltmiete), excluding utility advances.
    pub base_rent: Decimal,
    /// Rent including utility advances (Warmmiete).  Informational
    /// only; it is echoed in the result but never used in a formula.
    #[serde(default)]
    pub gross_rent: Option<Decimal>,
    /// Months of rent the parties agreed to as deposit.  May exceed
    /// the statutory cap, which the engine then flags.
    #[serde(default = "default_deposit_multiple")]
    pub agreed_deposit_multiple: Decimal,
    /// First day of the tenancy; the first installment is due here.
    pub tenancy_start_date: NaiveDate,
    /// How the deposit is held.
    #[serde(default, deserialize_with = "deserialize_lenient_type_id")]
    pub deposit_type_id: Option<DepositTypeId>,
}

fn default_deposit_multiple() -> Decimal {
    STATUTORY_MAX_MONTHS
}

// Unknown ids are treated like a missing id rather than failing the
// whole request.
fn deserialize_lenient_type_id<'de, D>(deserializer: D) -> Result<Option<DepositTypeId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse() {
        Ok(id) => Some(id),
        Err(err) => {
            tracing::warn!("{}; falling back to the default deposit type", err);
            None
        }
    }))
}

impl DepositInputs {
    /// The inputs a fresh calculator form starts with: 800 net rent,
    /// three months, bank escrow account, tenancy starting `today`.
    pub fn defaults(today: NaiveDate) -> Self {
        DepositInputs {
            base_rent: dec!(800),
            gross_rent: None,
            agreed_deposit_multiple: STATUTORY_MAX_MONTHS,
            tenancy_start_date: today,
            deposit_type_id: Some(DepositTypeId::BankEscrowAccount),
        }
    }
}

/// One of the three deposit installments (Ratenzahlung).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstallmentLine {
    /// 1-based position of the installment.
    pub index: u32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

/// Advice on the chosen way of holding the deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Surety bond chosen and the rent is high enough for the bond
    /// fee to beat tying up capital.
    SuretyBondWorthwhile,
    /// Cash payment chosen.
    CashDiscouraged,
    /// Everything else.
    EscrowAccountSafest,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::SuretyBondWorthwhile => {
                "A surety bond can be worthwhile at higher rents."
            }
            Recommendation::CashDiscouraged => {
                "Cash payment is discouraged - request an escrow account instead."
            }
            Recommendation::EscrowAccountSafest => {
                "A standard escrow deposit account is the safest option."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// The full breakdown produced by [`crate::engine::compute`].
///
/// Every monetary field except the echoed rents is rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositResult {
    pub base_rent: Decimal,
    pub gross_rent: Option<Decimal>,
    /// Three net rents, the legal maximum.
    pub statutory_max_amount: Decimal,
    /// Deposit actually owed, never above `statutory_max_amount`.
    pub deposit_amount: Decimal,
    /// Agreed multiple clamped to the statutory maximum.  Not rounded.
    pub capped_months: Decimal,
    pub exceeds_statutory_limit: bool,
    /// What the agreed multiple would overcharge beyond the cap.
    pub overpayment_amount: Decimal,
    pub installments: [InstallmentLine; INSTALLMENT_COUNT as usize],
    pub first_installment_amount: Decimal,
    pub deposit_type_id: DepositTypeId,
    pub deposit_type_label: String,
    pub annual_interest_amount: Decimal,
    pub annual_fee_amount: Decimal,
    pub five_year_interest_total: Decimal,
    pub five_year_fee_total: Decimal,
    pub five_year_projected_value: Decimal,
    pub recommendation: Recommendation,
}
