//! Entry point: validate terms, dispatch on the loan type, wrap in the
//! standard output envelope.

use std::time::Instant;

use crate::fixed_installment::{self, monthly_rate};
use crate::interest_only;
use crate::terms::{AmortizationResult, LoanKind, LoanTerms, LoanTermsInput};
use crate::types::{with_metadata, ComputationOutput};
use crate::validator;
use crate::EngineResult;

const INTEREST_ONLY_METHODOLOGY: &str =
    "Interest-only — flat payment of principal × rate per period, no amortization";
const FIXED_INSTALLMENT_METHODOLOGY: &str =
    "Fixed installment — level annuity payment, monthly compounding, declining-balance schedule";

/// Validate `input` and compute its payment and schedule.
pub fn calculate_amortization(
    input: &LoanTermsInput,
) -> EngineResult<ComputationOutput<AmortizationResult>> {
    let start = Instant::now();

    let terms = validator::validate(input).inspect_err(|e| {
        log::debug!("event=validation_failed loan_type={} error={}", input.loan_type, e);
    })?;

    let mut warnings: Vec<String> = Vec::new();
    let result = compute_with_warnings(terms.clone(), &mut warnings)?;

    let methodology = match terms.kind() {
        LoanKind::InterestOnly => INTEREST_ONLY_METHODOLOGY,
        LoanKind::FixedInstallment { .. } => FIXED_INSTALLMENT_METHODOLOGY,
    };

    let assumptions = match terms.kind() {
        LoanKind::InterestOnly => serde_json::json!({
            "terms": terms,
            "rate_basis": "per_payment_period",
        }),
        LoanKind::FixedInstallment { .. } => serde_json::json!({
            "terms": terms,
            "rate_basis": "annual_compounded_monthly",
            "monthly_rate": monthly_rate(terms.annual_rate_percent()).to_string(),
        }),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

/// Compute the result for already-validated terms.
pub fn compute(terms: LoanTerms) -> EngineResult<AmortizationResult> {
    let mut warnings = Vec::new();
    compute_with_warnings(terms, &mut warnings)
}

fn compute_with_warnings(
    terms: LoanTerms,
    warnings: &mut Vec<String>,
) -> EngineResult<AmortizationResult> {
    match terms.kind() {
        LoanKind::InterestOnly => {
            warnings.push(format!(
                "Interest-only rate of {}% is applied once per payment period; it is not converted from an annual figure",
                terms.annual_rate_percent()
            ));
            Ok(interest_only::compute(&terms))
        }
        LoanKind::FixedInstallment { installment_count } => fixed_installment::compute_with_warnings(
            terms.principal(),
            terms.annual_rate_percent(),
            installment_count,
            terms.balance_clamp(),
            warnings,
        ),
    }
}
