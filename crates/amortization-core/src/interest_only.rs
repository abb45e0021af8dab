//! Interest-only repayment: a flat recurring payment equal to one period's
//! interest. Principal is never amortized, so no schedule is produced.
//!
//! The rate is applied once per payment period, undivided. A form value of
//! `12` therefore means 12% per period, unlike the fixed-installment path
//! which converts the same figure to a monthly rate.

use crate::terms::{AmortizationResult, LoanTerms};
use crate::types::{round_to_cents, Money, Percent, PERCENT_DIVISOR};

/// `principal * (rate_percent / 100)`.
pub fn periodic_payment(principal: Money, rate_percent: Percent) -> Money {
    principal * (rate_percent / PERCENT_DIVISOR)
}

/// Interest-only result for validated terms. The schedule is always empty.
pub fn compute(terms: &LoanTerms) -> AmortizationResult {
    let payment = periodic_payment(terms.principal(), terms.annual_rate_percent());
    log::debug!(
        "event=interest_only_computed principal={} rate_percent={} payment={}",
        terms.principal(),
        terms.annual_rate_percent(),
        payment
    );

    AmortizationResult {
        periodic_payment: payment,
        quoted_payment: round_to_cents(payment),
        schedule: Vec::new(),
        summary: None,
    }
}
