//! Loan terms and amortization output types.
//!
//! `LoanTermsInput` is what callers hand in (a form, a JSON file, a binding).
//! `LoanTerms` is the validated, immutable value the calculators consume; it
//! can only be obtained from [`crate::validator::validate`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Input Types
// ---------------------------------------------------------------------------

/// Repayment model of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Flat recurring payment equal to one period's interest.
    InterestOnly,
    /// Level annuity payment amortizing the principal to zero.
    FixedInstallment,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::InterestOnly => "interest_only",
            LoanType::FixedInstallment => "fixed_installment",
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the fixed-installment schedule absorbs decimal drift in the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceClamp {
    /// `max(0, balance)` after every period.
    #[default]
    EveryPeriod,
    /// Intermediate balances are left as computed; the last one is set to zero.
    FinalPeriodOnly,
}

/// Unvalidated loan terms as supplied by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTermsInput {
    /// Amount lent.
    pub principal: Money,
    /// Rate as a percentage (12.5 = 12.5%).
    pub annual_rate_percent: Percent,
    pub loan_type: LoanType,
    /// Required for fixed-installment loans. Kept as a decimal so that
    /// fractional or negative counts reach the validator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_count: Option<Decimal>,
    #[serde(default)]
    pub balance_clamp: BalanceClamp,
}

impl LoanTermsInput {
    pub fn interest_only(principal: Money, annual_rate_percent: Percent) -> Self {
        LoanTermsInput {
            principal,
            annual_rate_percent,
            loan_type: LoanType::InterestOnly,
            installment_count: None,
            balance_clamp: BalanceClamp::default(),
        }
    }

    pub fn fixed_installment(
        principal: Money,
        annual_rate_percent: Percent,
        installment_count: u32,
    ) -> Self {
        LoanTermsInput {
            principal,
            annual_rate_percent,
            loan_type: LoanType::FixedInstallment,
            installment_count: Some(Decimal::from(installment_count)),
            balance_clamp: BalanceClamp::default(),
        }
    }

    pub fn with_balance_clamp(mut self, clamp: BalanceClamp) -> Self {
        self.balance_clamp = clamp;
        self
    }
}

// ---------------------------------------------------------------------------
// Validated Terms
// ---------------------------------------------------------------------------

/// Loan type together with the data only that type needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "loan_type", rename_all = "snake_case")]
pub enum LoanKind {
    InterestOnly,
    FixedInstallment { installment_count: u32 },
}

impl LoanKind {
    pub fn loan_type(&self) -> LoanType {
        match self {
            LoanKind::InterestOnly => LoanType::InterestOnly,
            LoanKind::FixedInstallment { .. } => LoanType::FixedInstallment,
        }
    }
}

/// Validated, immutable loan terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    principal: Money,
    annual_rate_percent: Percent,
    #[serde(flatten)]
    kind: LoanKind,
    balance_clamp: BalanceClamp,
}

impl LoanTerms {
    pub(crate) fn new(
        principal: Money,
        annual_rate_percent: Percent,
        kind: LoanKind,
        balance_clamp: BalanceClamp,
    ) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent,
            kind,
            balance_clamp,
        }
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> Percent {
        self.annual_rate_percent
    }

    pub fn kind(&self) -> LoanKind {
        self.kind
    }

    pub fn loan_type(&self) -> LoanType {
        self.kind.loan_type()
    }

    /// `Some` only for fixed-installment loans.
    pub fn installment_count(&self) -> Option<u32> {
        match self.kind {
            LoanKind::InterestOnly => None,
            LoanKind::FixedInstallment { installment_count } => Some(installment_count),
        }
    }

    pub fn balance_clamp(&self) -> BalanceClamp {
        self.balance_clamp
    }
}

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

/// A single period of an amortization schedule (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub number: u32,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// Column totals of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// periodic_payment * installment count.
    pub total_payments: Money,
    /// The amount lent, as the loan form's footer shows it.
    pub total_principal: Money,
    pub total_interest: Money,
}

/// Periodic payment plus the amortization schedule that produces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub periodic_payment: Money,
    /// periodic_payment rounded to cents, the amount recorded on the loan.
    pub quoted_payment: Money,
    /// Always empty for interest-only loans.
    pub schedule: Vec<Installment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScheduleSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_type_serde_identifiers() {
        let json = serde_json::to_string(&LoanType::FixedInstallment).unwrap();
        assert_eq!(json, "\"fixed_installment\"");
        let back: LoanType = serde_json::from_str("\"interest_only\"").unwrap();
        assert_eq!(back, LoanType::InterestOnly);
    }

    #[test]
    fn test_input_json_defaults() {
        let input: LoanTermsInput = serde_json::from_str(
            r#"{"principal": "10000", "annual_rate_percent": "12", "loan_type": "interest_only"}"#,
        )
        .unwrap();
        assert_eq!(input.principal, dec!(10000));
        assert_eq!(input.installment_count, None);
        assert_eq!(input.balance_clamp, BalanceClamp::EveryPeriod);
    }

    #[test]
    fn test_installment_count_only_on_fixed_kind() {
        let io = LoanTerms::new(
            dec!(100),
            dec!(5),
            LoanKind::InterestOnly,
            BalanceClamp::EveryPeriod,
        );
        assert_eq!(io.installment_count(), None);
        assert_eq!(io.loan_type(), LoanType::InterestOnly);

        let fixed = LoanTerms::new(
            dec!(100),
            dec!(5),
            LoanKind::FixedInstallment {
                installment_count: 24,
            },
            BalanceClamp::EveryPeriod,
        );
        assert_eq!(fixed.installment_count(), Some(24));
        assert_eq!(fixed.loan_type(), LoanType::FixedInstallment);
    }
}
