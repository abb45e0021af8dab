use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use amortization_core::validator::parse_loan_type;
use amortization_core::{calculate_amortization, BalanceClamp, LoanTermsInput, LoanType};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClampArg {
    /// Clamp the balance at zero after every installment
    EveryPeriod,
    /// Leave intermediate balances alone and zero the final one
    FinalPeriodOnly,
}

impl From<ClampArg> for BalanceClamp {
    fn from(arg: ClampArg) -> Self {
        match arg {
            ClampArg::EveryPeriod => BalanceClamp::EveryPeriod,
            ClampArg::FinalPeriodOnly => BalanceClamp::FinalPeriodOnly,
        }
    }
}

/// Arguments for a full payment and schedule calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount lent
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Interest rate in percent (e.g. 12.5 for 12.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// interest_only or fixed_installment
    #[arg(long, value_parser = loan_type_arg)]
    pub loan_type: Option<LoanType>,

    /// Number of installments (fixed_installment only)
    #[arg(long, alias = "installments")]
    pub installment_count: Option<Decimal>,

    /// Where decimal drift in the balance is absorbed
    #[arg(long, value_enum, default_value = "every-period")]
    pub clamp: ClampArg,
}

/// Arguments for an interest-only payment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Amount lent
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Interest rate per payment period in percent
    #[arg(long, alias = "rate")]
    pub rate_percent: Option<Decimal>,
}

fn loan_type_arg(raw: &str) -> Result<LoanType, String> {
    parse_loan_type(raw).map_err(|e| e.to_string())
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTermsInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        terms_from_args(args)?
    };

    log::debug!(
        "event=cli_schedule loan_type={} principal={}",
        terms.loan_type,
        terms.principal
    );

    let result = calculate_amortization(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = LoanTermsInput::interest_only(
        args.principal.ok_or("--principal is required")?,
        args.rate_percent.ok_or("--rate-percent is required")?,
    );

    let result = calculate_amortization(&terms)?;
    Ok(serde_json::to_value(result)?)
}

fn terms_from_args(args: ScheduleArgs) -> Result<LoanTermsInput, Box<dyn std::error::Error>> {
    let loan_type = args
        .loan_type
        .ok_or("--loan-type is required (or provide --input)")?;

    Ok(LoanTermsInput {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_rate_percent: args
            .annual_rate_percent
            .ok_or("--annual-rate-percent is required (or provide --input)")?,
        loan_type,
        installment_count: args.installment_count,
        balance_clamp: args.clamp.into(),
    })
}
