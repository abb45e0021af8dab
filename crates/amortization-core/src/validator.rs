//! Input validation for loan terms.
//!
//! Everything that reaches a calculator has passed through [`validate`]:
//! principal and rate are strictly positive and bounded, and a
//! fixed-installment loan carries a whole, positive installment count.
//! The coercion helpers cover callers that start from floats or form text.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::terms::{LoanKind, LoanTerms, LoanTermsInput, LoanType};
use crate::EngineResult;

/// Largest principal accepted. Keeps every intermediate product inside
/// the 96-bit decimal mantissa.
pub const MAX_PRINCIPAL: Decimal = dec!(1_000_000_000_000_000);

/// Largest rate accepted, in percent.
pub const MAX_RATE_PERCENT: Decimal = dec!(1_000_000);

/// Largest schedule the engine will build.
pub const MAX_INSTALLMENT_COUNT: u32 = 10_000;

/// Validate raw terms and produce the immutable `LoanTerms` the calculators use.
pub fn validate(input: &LoanTermsInput) -> EngineResult<LoanTerms> {
    let principal = validate_principal(input.principal)?;
    let annual_rate_percent = validate_rate(input.annual_rate_percent)?;

    let kind = match input.loan_type {
        LoanType::InterestOnly => LoanKind::InterestOnly,
        LoanType::FixedInstallment => LoanKind::FixedInstallment {
            installment_count: validate_installment_count(input.installment_count)?,
        },
    };

    Ok(LoanTerms::new(
        principal,
        annual_rate_percent,
        kind,
        input.balance_clamp,
    ))
}

pub fn validate_principal(principal: Decimal) -> EngineResult<Decimal> {
    if principal <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "principal",
            "Principal must be positive",
        ));
    }
    if principal > MAX_PRINCIPAL {
        return Err(AmortizationError::invalid(
            "principal",
            format!("Principal must not exceed {MAX_PRINCIPAL}"),
        ));
    }
    Ok(principal)
}

pub fn validate_rate(annual_rate_percent: Decimal) -> EngineResult<Decimal> {
    if annual_rate_percent <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "annual_rate_percent",
            "Interest rate must be positive",
        ));
    }
    if annual_rate_percent > MAX_RATE_PERCENT {
        return Err(AmortizationError::invalid(
            "annual_rate_percent",
            format!("Interest rate must not exceed {MAX_RATE_PERCENT}%"),
        ));
    }
    Ok(annual_rate_percent)
}

pub fn validate_installment_count(count: Option<Decimal>) -> EngineResult<u32> {
    let count = count.ok_or_else(|| {
        AmortizationError::invalid(
            "installment_count",
            "Installment count is required for fixed-installment loans",
        )
    })?;

    if count <= Decimal::ZERO {
        return Err(AmortizationError::invalid(
            "installment_count",
            "Installment count must be positive",
        ));
    }
    if !count.fract().is_zero() {
        return Err(AmortizationError::invalid(
            "installment_count",
            format!("Installment count must be a whole number, got {count}"),
        ));
    }

    match count.to_u32() {
        Some(n) if n <= MAX_INSTALLMENT_COUNT => Ok(n),
        _ => Err(AmortizationError::invalid(
            "installment_count",
            format!("Installment count must not exceed {MAX_INSTALLMENT_COUNT}"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Boundary coercions
// ---------------------------------------------------------------------------

/// Convert a float into a decimal, rejecting NaN and infinities.
pub fn decimal_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(AmortizationError::invalid(
            field,
            format!("Expected a finite number, got {value}"),
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        AmortizationError::invalid(field, format!("{value} is outside the decimal range"))
    })
}

/// Parse a form field into a decimal.
pub fn parse_decimal(field: &str, raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AmortizationError::invalid(field, "Value is required"));
    }
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| AmortizationError::invalid(field, format!("'{trimmed}' is not a number")))
}

/// Parse a loan type identifier (`interest_only`, `Fixed-Installment`, ...).
pub fn parse_loan_type(raw: &str) -> EngineResult<LoanType> {
    let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    match normalized.as_str() {
        "interest_only" => Ok(LoanType::InterestOnly),
        "fixed_installment" => Ok(LoanType::FixedInstallment),
        _ => Err(AmortizationError::invalid(
            "loan_type",
            format!("Unknown loan type '{}'", raw.trim()),
        )),
    }
}
