//! Property tests for the payroll calculation engine.
//!
//! Amounts are generated in whole kobo so every input is a valid
//! two-decimal naira figure.

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::calculation::{
    calculate_annual_tax, calculate_nhf, compute_payroll_breakdown,
};
use payroll_engine::config::StatutoryConfig;
use payroll_engine::models::{CompensationInput, TaxPolicy};

/// Up to ₦100,000,000 a month.
fn arb_monthly_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000_000_000).prop_map(|kobo| Decimal::new(kobo, 2))
}

/// Up to ₦1,200,000,000 a year.
fn arb_annual_income() -> impl Strategy<Value = Decimal> {
    (0i64..=120_000_000_000).prop_map(|kobo| Decimal::new(kobo, 2))
}

fn arb_policy() -> impl Strategy<Value = TaxPolicy> {
    any::<bool>().prop_map(|apply_consolidated_relief| TaxPolicy {
        apply_consolidated_relief,
    })
}

proptest! {
    // =================================================================
    // Breakdown composition
    // =================================================================

    #[test]
    fn net_plus_deductions_equals_gross(
        basic in arb_monthly_amount(),
        allowances in arb_monthly_amount(),
        policy in arb_policy(),
    ) {
        let config = StatutoryConfig::nigeria_2024();
        let input = CompensationInput::new(basic, allowances).unwrap();
        let b = compute_payroll_breakdown(&input, &config, policy).unwrap();

        prop_assert_eq!(b.gross_pay, basic + allowances);
        prop_assert_eq!(b.net_pay + b.total_deductions, b.gross_pay);
        prop_assert_eq!(
            b.total_deductions,
            b.paye_tax
                + b.pension_contribution
                + b.nhf_contribution
                + b.nsitf_contribution
                + b.itf_contribution
        );
    }

    #[test]
    fn every_amount_has_two_decimal_places(
        basic in arb_monthly_amount(),
        allowances in arb_monthly_amount(),
        policy in arb_policy(),
    ) {
        let config = StatutoryConfig::nigeria_2024();
        let input = CompensationInput::new(basic, allowances).unwrap();
        let b = compute_payroll_breakdown(&input, &config, policy).unwrap();

        for amount in [
            b.gross_pay,
            b.paye_tax,
            b.pension_contribution,
            b.nhf_contribution,
            b.nsitf_contribution,
            b.itf_contribution,
            b.total_deductions,
            b.net_pay,
        ] {
            prop_assert_eq!(amount.scale(), 2);
            prop_assert!(amount >= Decimal::ZERO);
        }
    }

    #[test]
    fn breakdown_is_deterministic(
        basic in arb_monthly_amount(),
        allowances in arb_monthly_amount(),
    ) {
        let config = StatutoryConfig::nigeria_2024();
        let input = CompensationInput::new(basic, allowances).unwrap();
        let first = compute_payroll_breakdown(&input, &config, TaxPolicy::GROSS).unwrap();
        let second = compute_payroll_breakdown(&input, &config, TaxPolicy::GROSS).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn raising_basic_salary_never_lowers_a_deduction(
        a in arb_monthly_amount(),
        b in arb_monthly_amount(),
        allowances in arb_monthly_amount(),
        policy in arb_policy(),
    ) {
        let config = StatutoryConfig::nigeria_2024();
        let cap = config.deductions().nhf.monthly_cap;
        let (low_basic, high_basic) = if a <= b { (a, b) } else { (b, a) };

        let low_input = CompensationInput::new(low_basic, allowances).unwrap();
        let high_input = CompensationInput::new(high_basic, allowances).unwrap();
        let low = compute_payroll_breakdown(&low_input, &config, policy).unwrap();
        let high = compute_payroll_breakdown(&high_input, &config, policy).unwrap();

        prop_assert!(low.paye_tax <= high.paye_tax);
        prop_assert!(low.pension_contribution <= high.pension_contribution);
        prop_assert!(low.nsitf_contribution <= high.nsitf_contribution);
        prop_assert!(low.itf_contribution <= high.itf_contribution);

        // NHF rises until it reaches the cap, then stays there
        prop_assert!(low.nhf_contribution <= high.nhf_contribution);
        prop_assert!(high.nhf_contribution <= cap);
        if low.nhf_contribution == cap {
            prop_assert_eq!(high.nhf_contribution, cap);
        }
    }

    #[test]
    fn relief_never_raises_paye(basic in arb_monthly_amount()) {
        let config = StatutoryConfig::nigeria_2024();
        let input = CompensationInput::basic_only(basic).unwrap();
        let gross = compute_payroll_breakdown(&input, &config, TaxPolicy::GROSS).unwrap();
        let relieved =
            compute_payroll_breakdown(&input, &config, TaxPolicy::CONSOLIDATED_RELIEF).unwrap();

        prop_assert!(relieved.paye_tax <= gross.paye_tax);
        prop_assert_eq!(relieved.pension_contribution, gross.pension_contribution);
    }

    // =================================================================
    // Progressive brackets
    // =================================================================

    #[test]
    fn annual_tax_is_monotonic(a in arb_annual_income(), b in arb_annual_income()) {
        let config = StatutoryConfig::nigeria_2024();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_tax = calculate_annual_tax(low, config.brackets()).unwrap();
        let high_tax = calculate_annual_tax(high, config.brackets()).unwrap();
        prop_assert!(low_tax <= high_tax);
    }

    #[test]
    fn annual_tax_between_lowest_and_highest_rate(income in arb_annual_income()) {
        let config = StatutoryConfig::nigeria_2024();
        let tax = calculate_annual_tax(income, config.brackets()).unwrap();

        prop_assert!(tax >= income * Decimal::new(7, 2));
        prop_assert!(tax <= income * Decimal::new(24, 2));
    }

    #[test]
    fn one_kobo_more_costs_at_most_the_marginal_rate(income in arb_annual_income()) {
        let config = StatutoryConfig::nigeria_2024();
        let kobo = Decimal::new(1, 2);

        let tax = calculate_annual_tax(income, config.brackets()).unwrap();
        let next = calculate_annual_tax(income + kobo, config.brackets()).unwrap();
        let step = next - tax;

        prop_assert!(step >= kobo * Decimal::new(7, 2));
        prop_assert!(step <= kobo * Decimal::new(24, 2));
    }

    // =================================================================
    // Flat deductions
    // =================================================================

    #[test]
    fn nhf_never_exceeds_cap(gross in arb_monthly_amount()) {
        let config = StatutoryConfig::nigeria_2024();
        let nhf = &config.deductions().nhf;
        let result = calculate_nhf(gross, nhf, 1);

        prop_assert!(result.amount <= nhf.monthly_cap);
        prop_assert_eq!(result.cap_applied, gross * nhf.rate > nhf.monthly_cap);
    }

    // =================================================================
    // Input validation
    // =================================================================

    #[test]
    fn negative_amounts_rejected(kobo in 1i64..=10_000_000_000, basic_side in any::<bool>()) {
        let negative = Decimal::new(-kobo, 2);
        let result = if basic_side {
            CompensationInput::new(negative, Decimal::ZERO)
        } else {
            CompensationInput::new(Decimal::ZERO, negative)
        };
        prop_assert!(result.is_err());
    }

    #[test]
    fn non_finite_floats_rejected(value in prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]) {
        prop_assert!(CompensationInput::from_f64(value, 0.0).is_err());
        prop_assert!(CompensationInput::from_f64(0.0, value).is_err());
    }
}
