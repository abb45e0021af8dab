//! Loan amortization engine.
//!
//! Computes the periodic payment and amortization schedule for
//! interest-only and fixed-installment loans from plain decimal inputs.
//! No storage, identity or UI concerns live here.

pub mod engine;
pub mod error;
pub mod fixed_installment;
pub mod interest_only;
pub mod terms;
pub mod types;
pub mod validator;

pub use engine::calculate_amortization;
pub use error::AmortizationError;
pub use terms::*;
pub use types::*;

/// Standard result type for all engine operations
pub type EngineResult<T> = Result<T, AmortizationError>;
