use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use amortization_core::validator::parse_decimal;
use amortization_core::{calculate_amortization, LoanTermsInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

/// Full envelope (payment, schedule, warnings) for a JSON `LoanTermsInput`.
#[napi]
pub fn calculate_amortization_json(input_json: String) -> NapiResult<String> {
    let input: LoanTermsInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculate_amortization(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Interest-only payment from form strings; returns the decimal as a string.
#[napi]
pub fn interest_only_payment(principal: String, rate_percent: String) -> NapiResult<String> {
    let principal: Decimal = parse_decimal("principal", &principal).map_err(to_napi_error)?;
    let rate: Decimal = parse_decimal("annual_rate_percent", &rate_percent).map_err(to_napi_error)?;
    let output = calculate_amortization(&LoanTermsInput::interest_only(principal, rate))
        .map_err(to_napi_error)?;
    Ok(output.result.periodic_payment.to_string())
}
