//! Fixed-installment (level annuity) loans.
//!
//! The annual percentage is converted to a monthly rate, the constant
//! payment comes from the annuity formula, and the schedule walks the
//! declining balance one period at a time:
//!
//! ```text
//! r       = (annual_rate_percent / 100) / 12
//! payment = principal * r / (1 - (1 + r)^-n)
//! ```
//!
//! Decimal rounding leaves a residue of a few units in the last place on the
//! final balance. [`BalanceClamp`] decides where that residue is absorbed.
//! A residue above [`RESIDUAL_TOLERANCE`] means the per-period principal
//! fell below the precision of the balance, and the terms are rejected.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::terms::{AmortizationResult, BalanceClamp, Installment, ScheduleSummary};
use crate::types::{round_to_cents, Money, Percent, Rate, PERCENT_DIVISOR};
use crate::validator;
use crate::EngineResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Compounding periods per year.
const PERIODS_PER_YEAR: Decimal = dec!(12);
/// Largest balance the last installment may leave before the schedule is
/// rejected as not amortizing.
pub const RESIDUAL_TOLERANCE: Money = dec!(0.01);

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the level payment and the full amortization schedule.
pub fn compute(
    principal: Money,
    annual_rate_percent: Percent,
    installment_count: u32,
    clamp: BalanceClamp,
) -> EngineResult<AmortizationResult> {
    let mut warnings = Vec::new();
    compute_with_warnings(
        principal,
        annual_rate_percent,
        installment_count,
        clamp,
        &mut warnings,
    )
}

/// Monthly rate for an annual percentage: `(pct / 100) / 12`.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT_DIVISOR / PERIODS_PER_YEAR
}

/// Level annuity payment for `installment_count` periods at `rate` per period.
pub fn level_payment(principal: Money, rate: Rate, installment_count: u32) -> EngineResult<Money> {
    if rate <= Decimal::ZERO {
        return Err(AmortizationError::DegenerateTerms(format!(
            "Periodic rate {rate} is not positive at decimal precision"
        )));
    }

    // (1 + r)^-n as a power of a factor below one: it shrinks toward zero
    // instead of overflowing for long or high-rate loans.
    let discount = (Decimal::ONE / (Decimal::ONE + rate))
        .checked_powi(i64::from(installment_count))
        .ok_or_else(|| {
            AmortizationError::DegenerateTerms(format!(
                "(1 + {rate})^-{installment_count} cannot be evaluated at decimal precision"
            ))
        })?;
    let denominator = Decimal::ONE - discount;

    if denominator.is_zero() {
        return Err(AmortizationError::DegenerateTerms(format!(
            "Annuity denominator is zero for rate {rate} over {installment_count} periods"
        )));
    }

    Ok(principal * (rate / denominator))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn compute_with_warnings(
    principal: Money,
    annual_rate_percent: Percent,
    installment_count: u32,
    clamp: BalanceClamp,
    warnings: &mut Vec<String>,
) -> EngineResult<AmortizationResult> {
    validator::validate_principal(principal)?;
    validator::validate_rate(annual_rate_percent)?;
    validator::validate_installment_count(Some(Decimal::from(installment_count)))?;

    let rate = monthly_rate(annual_rate_percent);
    let payment = level_payment(principal, rate, installment_count)?;
    let schedule = build_schedule(principal, rate, payment, installment_count, clamp, warnings)?;
    let summary = summarize(&schedule, principal, payment);

    log::debug!(
        "event=fixed_installment_computed principal={} monthly_rate={} periods={} payment={} clamp={:?}",
        principal,
        rate,
        installment_count,
        payment,
        clamp
    );

    Ok(AmortizationResult {
        periodic_payment: payment,
        quoted_payment: round_to_cents(payment),
        schedule,
        summary: Some(summary),
    })
}

fn build_schedule(
    principal: Money,
    rate: Rate,
    payment: Money,
    installment_count: u32,
    clamp: BalanceClamp,
    warnings: &mut Vec<String>,
) -> EngineResult<Vec<Installment>> {
    let mut schedule: Vec<Installment> = Vec::with_capacity(installment_count as usize);
    let mut balance = principal;

    for number in 1..=installment_count {
        let interest_portion = balance * rate;
        let principal_portion = payment - interest_portion;
        let unclamped = balance - principal_portion;
        let is_final = number == installment_count;

        if is_final && unclamped.abs() > RESIDUAL_TOLERANCE {
            return Err(AmortizationError::DegenerateTerms(format!(
                "Schedule does not amortize: balance {unclamped} remains after installment {number} \
                 at rate {rate} per period"
            )));
        }

        balance = match clamp {
            BalanceClamp::EveryPeriod => {
                if unclamped < Decimal::ZERO && !is_final {
                    log::warn!("event=balance_clamped installment={number} balance={unclamped}");
                    warnings.push(format!(
                        "Balance went negative ({unclamped}) at installment {number} and was clamped to zero before the final period"
                    ));
                }
                unclamped.max(Decimal::ZERO)
            }
            BalanceClamp::FinalPeriodOnly if is_final => {
                log::debug!("event=final_residual_absorbed balance={unclamped}");
                Decimal::ZERO
            }
            BalanceClamp::FinalPeriodOnly => {
                if unclamped < Decimal::ZERO {
                    log::warn!("event=negative_balance installment={number} balance={unclamped}");
                    warnings.push(format!(
                        "Balance is negative ({unclamped}) at installment {number}"
                    ));
                }
                unclamped
            }
        };

        schedule.push(Installment {
            number,
            payment,
            principal_portion,
            interest_portion,
            remaining_balance: balance,
        });
    }

    Ok(schedule)
}

/// Totals row. `total_principal` is the amount lent; the summed principal
/// portions differ from it by the final residual, which is bounded by
/// [`RESIDUAL_TOLERANCE`].
fn summarize(schedule: &[Installment], principal: Money, payment: Money) -> ScheduleSummary {
    ScheduleSummary {
        total_payments: payment * Decimal::from(schedule.len() as u64),
        total_principal: principal,
        total_interest: schedule.iter().map(|i| i.interest_portion).sum(),
    }
}
