use amortization_core::{
    calculate_amortization, engine, fixed_installment, interest_only, validator,
    AmortizationError, BalanceClamp, LoanTermsInput, LoanType,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOLERANCE: Decimal = dec!(0.01);

fn typical_loans() -> Vec<(Decimal, Decimal, u32)> {
    vec![
        (dec!(10000), dec!(12), 12),
        (dec!(2500), dec!(36), 6),
        (dec!(180000), dec!(7.25), 240),
        (dec!(350000), dec!(4.5), 360),
        (dec!(750.50), dec!(99.9), 3),
        (dec!(1_000_000), dec!(0.5), 120),
    ]
}

/// High rates and long terms, up to the validator's bounds.
fn stressed_loans() -> Vec<(Decimal, Decimal, u32)> {
    vec![
        (dec!(10000), dec!(240), 360),
        (dec!(10000), dec!(120), 720),
        (dec!(10000), dec!(12), 10_000),
        (dec!(10000), dec!(120), 240),
        (dec!(250000), dec!(60), 360),
        (dec!(50000), dec!(9.99), 1200),
        (dec!(1000), validator::MAX_RATE_PERCENT, validator::MAX_INSTALLMENT_COUNT),
    ]
}

// ===========================================================================
// Scenario tests
// ===========================================================================

#[test]
fn test_scenario_a_interest_only() {
    let out = calculate_amortization(&LoanTermsInput::interest_only(dec!(10000), dec!(12))).unwrap();
    assert_eq!(out.result.periodic_payment, dec!(1200));
    assert_eq!(out.result.quoted_payment, dec!(1200.00));
    assert!(out.result.schedule.is_empty());
}

#[test]
fn test_scenario_b_fixed_installment() {
    let out =
        calculate_amortization(&LoanTermsInput::fixed_installment(dec!(10000), dec!(12), 12))
            .unwrap();
    let r = &out.result;

    assert_eq!(fixed_installment::monthly_rate(dec!(12)), dec!(0.01));
    assert_eq!(r.quoted_payment, dec!(888.49));
    assert_eq!(r.schedule.len(), 12);

    let first = &r.schedule[0];
    assert_eq!(first.interest_portion, dec!(100));
    assert!((first.principal_portion - dec!(788.49)).abs() < TOLERANCE);
    assert!((first.remaining_balance - dec!(9211.51)).abs() < TOLERANCE);

    assert!(r.schedule[11].remaining_balance < TOLERANCE);
}

// ===========================================================================
// Schedule properties
// ===========================================================================

#[test]
fn test_interest_only_matches_formula() {
    for (principal, rate, _) in typical_loans() {
        let expected = principal * rate / dec!(100);
        let payment = interest_only::periodic_payment(principal, rate);
        assert!(
            (payment - expected).abs() < dec!(0.0000001),
            "principal {principal} rate {rate}: {payment} != {expected}"
        );
    }
}

#[test]
fn test_schedule_properties_hold_for_typical_loans() {
    for (principal, rate, n) in typical_loans() {
        let result = fixed_installment::compute(principal, rate, n, BalanceClamp::EveryPeriod)
            .unwrap();

        assert_eq!(result.schedule.len(), n as usize);

        let mut previous = principal;
        for (idx, inst) in result.schedule.iter().enumerate() {
            assert_eq!(inst.number as usize, idx + 1);
            assert_eq!(inst.payment, result.periodic_payment);
            assert!(
                inst.remaining_balance <= previous,
                "{principal}@{rate}x{n}: balance rose at period {}",
                inst.number
            );
            assert!(inst.remaining_balance >= Decimal::ZERO);
            previous = inst.remaining_balance;
        }

        assert!(
            previous < TOLERANCE,
            "{principal}@{rate}x{n}: terminal balance {previous}"
        );

        let summary = result.summary.unwrap();
        assert!((summary.total_principal - principal).abs() < TOLERANCE);
        assert!(
            (summary.total_payments - summary.total_principal - summary.total_interest).abs()
                < TOLERANCE
        );
    }
}

#[test]
fn test_stressed_loans_amortize_or_are_rejected() {
    let mut amortized = 0;
    for (principal, rate, n) in stressed_loans() {
        for clamp in [BalanceClamp::EveryPeriod, BalanceClamp::FinalPeriodOnly] {
            let input =
                LoanTermsInput::fixed_installment(principal, rate, n).with_balance_clamp(clamp);
            match calculate_amortization(&input) {
                Ok(out) => {
                    let r = out.result;
                    assert_eq!(r.schedule.len(), n as usize);
                    let last = r.schedule.last().unwrap();
                    assert!(
                        last.remaining_balance.abs() < TOLERANCE,
                        "{principal}@{rate}x{n} {clamp:?}: terminal balance {}",
                        last.remaining_balance
                    );
                    let repaid: Decimal = r.schedule.iter().map(|i| i.principal_portion).sum();
                    assert!(
                        (repaid - principal).abs() < TOLERANCE,
                        "{principal}@{rate}x{n} {clamp:?}: repaid {repaid}"
                    );
                    assert_eq!(r.summary.unwrap().total_principal, principal);
                    amortized += 1;
                }
                Err(AmortizationError::DegenerateTerms(msg)) => {
                    assert!(!msg.contains("overflow"), "{principal}@{rate}x{n}: {msg}");
                }
                Err(other) => panic!("{principal}@{rate}x{n} {clamp:?}: {other:?}"),
            }
        }
    }
    // 120% x 240, 60% x 360 and 9.99% x 1200 stay within decimal precision
    assert!(amortized >= 6, "only {amortized} stressed schedules amortized");
}

#[test]
fn test_pure_interest_collapse_is_rejected() {
    let input = LoanTermsInput::fixed_installment(dec!(10000), dec!(240), 360)
        .with_balance_clamp(BalanceClamp::FinalPeriodOnly);
    assert!(matches!(
        calculate_amortization(&input),
        Err(AmortizationError::DegenerateTerms(_))
    ));
}

#[test]
fn test_first_period_interest_is_one_month_of_rate() {
    for (principal, rate, n) in typical_loans() {
        let result = fixed_installment::compute(principal, rate, n, BalanceClamp::EveryPeriod)
            .unwrap();
        let expected = principal * fixed_installment::monthly_rate(rate);
        assert_eq!(result.schedule[0].interest_portion, expected);
    }
}

#[test]
fn test_clamp_policies_agree_except_final_balance() {
    for (principal, rate, n) in typical_loans() {
        let every = fixed_installment::compute(principal, rate, n, BalanceClamp::EveryPeriod)
            .unwrap();
        let final_only =
            fixed_installment::compute(principal, rate, n, BalanceClamp::FinalPeriodOnly).unwrap();

        let last = n as usize - 1;
        assert_eq!(&every.schedule[..last], &final_only.schedule[..last]);
        assert_eq!(final_only.schedule[last].remaining_balance, Decimal::ZERO);
        assert!((every.schedule[last].remaining_balance).abs() < TOLERANCE);
    }
}

#[test]
fn test_identical_requests_identical_results() {
    let input = LoanTermsInput::fixed_installment(dec!(98765.43), dec!(14.75), 84);
    let a = calculate_amortization(&input).unwrap();
    let b = calculate_amortization(&input).unwrap();
    assert_eq!(a.result, b.result);
    assert_eq!(a.assumptions, b.assumptions);
    assert_eq!(a.warnings, b.warnings);
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_invalid_inputs_name_their_field() {
    let mut fractional = LoanTermsInput::fixed_installment(dec!(1000), dec!(12), 12);
    fractional.installment_count = Some(dec!(6.5));
    let mut missing = LoanTermsInput::fixed_installment(dec!(1000), dec!(12), 12);
    missing.installment_count = None;

    let cases = vec![
        (LoanTermsInput::interest_only(dec!(0), dec!(12)), "principal"),
        (LoanTermsInput::interest_only(dec!(-50), dec!(12)), "principal"),
        (LoanTermsInput::interest_only(dec!(1000), dec!(-1)), "annual_rate_percent"),
        (LoanTermsInput::fixed_installment(dec!(1000), dec!(12), 0), "installment_count"),
        (fractional, "installment_count"),
        (missing, "installment_count"),
    ];

    for (input, field) in cases {
        match calculate_amortization(&input) {
            Err(AmortizationError::InvalidInput { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected InvalidInput on {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_form_fields_to_schedule() {
    let input = LoanTermsInput {
        principal: validator::parse_decimal("principal", "10000").unwrap(),
        annual_rate_percent: validator::decimal_from_f64("annual_rate_percent", 12.0).unwrap(),
        loan_type: validator::parse_loan_type("fixed_installment").unwrap(),
        installment_count: Some(validator::parse_decimal("installment_count", "12").unwrap()),
        balance_clamp: BalanceClamp::default(),
    };
    let terms = validator::validate(&input).unwrap();
    assert_eq!(terms.loan_type(), LoanType::FixedInstallment);

    let result = engine::compute(terms).unwrap();
    assert_eq!(result.quoted_payment, dec!(888.49));
}

#[test]
fn test_json_request() {
    let input: LoanTermsInput = serde_json::from_str(
        r#"{
            "principal": "10000",
            "annual_rate_percent": "12",
            "loan_type": "fixed_installment",
            "installment_count": "12",
            "balance_clamp": "final_period_only"
        }"#,
    )
    .unwrap();
    let out = calculate_amortization(&input).unwrap();
    assert_eq!(out.result.schedule[11].remaining_balance, Decimal::ZERO);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["quoted_payment"], "888.49");
    assert_eq!(json["result"]["schedule"].as_array().unwrap().len(), 12);
    assert_eq!(json["metadata"]["precision"], "rust_decimal_128bit");
}

#[test]
fn test_interest_only_json_omits_summary() {
    let out = calculate_amortization(&LoanTermsInput::interest_only(dec!(500), dec!(2))).unwrap();
    let json = serde_json::to_value(&out.result).unwrap();
    assert!(json.get("summary").is_none());
    assert_eq!(json["schedule"], serde_json::json!([]));
}
