//! Flat-rate statutory deductions.
//!
//! Pension, NHF, NSITF and ITF are each a fixed share of monthly gross pay.
//! NHF is the only one with a monthly ceiling. None depends on another.

use rust_decimal::Decimal;

use crate::config::{CappedRate, DeductionConfig, FlatRate};
use crate::models::AuditStep;

use super::rounding::round_money;

/// The statutory deductions computed from gross pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeductionKind {
    /// Contributory pension.
    Pension,
    /// National Housing Fund.
    Nhf,
    /// Nigeria Social Insurance Trust Fund.
    Nsitf,
    /// Industrial Training Fund.
    Itf,
}

impl DeductionKind {
    /// Stable identifier used in audit steps.
    pub fn rule_id(self) -> &'static str {
        match self {
            Self::Pension => "pension",
            Self::Nhf => "nhf",
            Self::Nsitf => "nsitf",
            Self::Itf => "itf",
        }
    }

    /// Human-readable name.
    pub fn rule_name(self) -> &'static str {
        match self {
            Self::Pension => "Pension Contribution",
            Self::Nhf => "National Housing Fund",
            Self::Nsitf => "NSITF Contribution",
            Self::Itf => "ITF Levy",
        }
    }
}

/// The result of a single deduction, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Which deduction this is.
    pub kind: DeductionKind,
    /// The amount deducted, rounded to kobo.
    pub amount: Decimal,
    /// True if the monthly ceiling reduced the amount.
    pub cap_applied: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// All four flat deductions for one gross amount.
#[derive(Debug, Clone)]
pub struct StatutoryDeductions {
    /// Pension contribution.
    pub pension: DeductionResult,
    /// NHF contribution.
    pub nhf: DeductionResult,
    /// NSITF contribution.
    pub nsitf: DeductionResult,
    /// ITF levy.
    pub itf: DeductionResult,
}

impl StatutoryDeductions {
    /// Sum of the four amounts.
    pub fn total(&self) -> Decimal {
        self.pension.amount + self.nhf.amount + self.nsitf.amount + self.itf.amount
    }

    /// The four audit steps, in order.
    pub fn into_audit_steps(self) -> Vec<AuditStep> {
        vec![
            self.pension.audit_step,
            self.nhf.audit_step,
            self.nsitf.audit_step,
            self.itf.audit_step,
        ]
    }
}

fn rate_deduction(
    kind: DeductionKind,
    gross_pay: Decimal,
    rate: Decimal,
    cap: Option<Decimal>,
    clause: &str,
    step_number: u32,
) -> DeductionResult {
    let uncapped = gross_pay * rate;
    let (capped, cap_applied) = match cap {
        Some(cap) if uncapped > cap => (cap, true),
        _ => (uncapped, false),
    };
    let amount = round_money(capped);

    let mut input = serde_json::json!({
        "gross_pay": gross_pay.normalize().to_string(),
        "rate": rate.normalize().to_string()
    });
    let mut output = serde_json::json!({
        "amount": amount.to_string()
    });
    if let Some(cap) = cap {
        input["monthly_cap"] = serde_json::json!(cap.normalize().to_string());
        output["uncapped_amount"] = serde_json::json!(uncapped.normalize().to_string());
        output["cap_applied"] = serde_json::json!(cap_applied);
    }

    let reasoning = match cap {
        Some(cap) if cap_applied => format!(
            "₦{} × {} = ₦{} (capped at monthly maximum ₦{})",
            gross_pay.normalize(),
            rate.normalize(),
            uncapped.normalize(),
            cap.normalize()
        ),
        _ => format!(
            "₦{} × {} = ₦{}",
            gross_pay.normalize(),
            rate.normalize(),
            amount
        ),
    };

    DeductionResult {
        kind,
        amount,
        cap_applied,
        audit_step: AuditStep {
            step_number,
            rule_id: kind.rule_id().to_string(),
            rule_name: kind.rule_name().to_string(),
            clause_ref: clause.to_string(),
            input,
            output,
            reasoning,
        },
    }
}

fn flat(
    kind: DeductionKind,
    gross_pay: Decimal,
    config: &FlatRate,
    step_number: u32,
) -> DeductionResult {
    rate_deduction(kind, gross_pay, config.rate, None, &config.clause, step_number)
}

/// Calculates the employee pension contribution (8%, uncapped).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pension;
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let result = calculate_pension(Decimal::new(350_000, 0), &config.deductions().pension, 1);
/// assert_eq!(result.amount, Decimal::new(28_000, 0));
/// ```
pub fn calculate_pension(
    gross_pay: Decimal,
    config: &FlatRate,
    step_number: u32,
) -> DeductionResult {
    flat(DeductionKind::Pension, gross_pay, config, step_number)
}

/// Calculates the NHF contribution (2.5%, capped monthly).
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_nhf;
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let result = calculate_nhf(Decimal::new(5_000_000, 0), &config.deductions().nhf, 1);
/// assert_eq!(result.amount, Decimal::new(100_000, 0));
/// assert!(result.cap_applied);
/// ```
pub fn calculate_nhf(gross_pay: Decimal, config: &CappedRate, step_number: u32) -> DeductionResult {
    rate_deduction(
        DeductionKind::Nhf,
        gross_pay,
        config.rate,
        Some(config.monthly_cap),
        &config.clause,
        step_number,
    )
}

/// Calculates the NSITF contribution (1%, uncapped).
pub fn calculate_nsitf(gross_pay: Decimal, config: &FlatRate, step_number: u32) -> DeductionResult {
    flat(DeductionKind::Nsitf, gross_pay, config, step_number)
}

/// Calculates the ITF levy (1%, uncapped).
pub fn calculate_itf(gross_pay: Decimal, config: &FlatRate, step_number: u32) -> DeductionResult {
    flat(DeductionKind::Itf, gross_pay, config, step_number)
}

/// Calculates all four flat deductions from the same gross pay.
///
/// Steps are numbered consecutively from `step_number` in the order
/// pension, NHF, NSITF, ITF.
pub fn calculate_statutory_deductions(
    gross_pay: Decimal,
    config: &DeductionConfig,
    step_number: u32,
) -> StatutoryDeductions {
    StatutoryDeductions {
        pension: calculate_pension(gross_pay, &config.pension, step_number),
        nhf: calculate_nhf(gross_pay, &config.nhf, step_number + 1),
        nsitf: calculate_nsitf(gross_pay, &config.nsitf, step_number + 2),
        itf: calculate_itf(gross_pay, &config.itf, step_number + 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatutoryConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deductions() -> DeductionConfig {
        StatutoryConfig::nigeria_2024().deductions().clone()
    }

    #[test]
    fn test_deductions_on_350k_gross() {
        let result = calculate_statutory_deductions(dec("350000"), &deductions(), 1);

        assert_eq!(result.pension.amount, dec("28000"));
        assert_eq!(result.nhf.amount, dec("8750"));
        assert_eq!(result.nsitf.amount, dec("3500"));
        assert_eq!(result.itf.amount, dec("3500"));
        assert_eq!(result.total(), dec("43750"));
        assert!(!result.nhf.cap_applied);
    }

    #[test]
    fn test_nhf_capped_at_100k() {
        let result = calculate_nhf(dec("5000000"), &deductions().nhf, 1);

        assert_eq!(result.amount, dec("100000"));
        assert!(result.cap_applied);
        assert_eq!(
            result.audit_step.output["uncapped_amount"].as_str().unwrap(),
            "125000"
        );
        assert!(result.audit_step.reasoning.contains("capped"));
    }

    #[test]
    fn test_nhf_exactly_at_cap_not_flagged() {
        // 2.5% of 4,000,000 is exactly 100,000
        let result = calculate_nhf(dec("4000000"), &deductions().nhf, 1);
        assert_eq!(result.amount, dec("100000"));
        assert!(!result.cap_applied);
    }

    #[test]
    fn test_pension_uncapped_on_large_gross() {
        let result = calculate_pension(dec("50000000"), &deductions().pension, 1);
        assert_eq!(result.amount, dec("4000000"));
        assert!(!result.cap_applied);
        assert!(result.audit_step.output.get("cap_applied").is_none());
    }

    #[test]
    fn test_zero_gross_gives_zero_deductions() {
        let result = calculate_statutory_deductions(Decimal::ZERO, &deductions(), 1);
        assert_eq!(result.total(), Decimal::ZERO);
        assert_eq!(result.pension.amount.to_string(), "0.00");
    }

    #[test]
    fn test_amounts_round_half_up_to_kobo() {
        // 1% of 100.50 = 1.005
        let result = calculate_nsitf(dec("100.50"), &deductions().nsitf, 1);
        assert_eq!(result.amount, dec("1.01"));

        // 2.5% of 0.10 = 0.0025
        let result = calculate_nhf(dec("0.10"), &deductions().nhf, 1);
        assert_eq!(result.amount, dec("0.00"));

        // 8% of 1234.56 = 98.7648
        let result = calculate_pension(dec("1234.56"), &deductions().pension, 1);
        assert_eq!(result.amount, dec("98.76"));
    }

    #[test]
    fn test_steps_numbered_in_order() {
        let result = calculate_statutory_deductions(dec("100000"), &deductions(), 4);
        let steps = result.into_audit_steps();

        let ids: Vec<&str> = steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["pension", "nhf", "nsitf", "itf"]);
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_audit_step_records_clause_and_rate() {
        let result = calculate_itf(dec("200000"), &deductions().itf, 1);
        assert_eq!(result.audit_step.clause_ref, "ITF Act s.6");
        assert_eq!(result.audit_step.input["rate"].as_str().unwrap(), "0.01");
        assert_eq!(result.audit_step.output["amount"].as_str().unwrap(), "2000.00");
        assert_eq!(result.audit_step.reasoning, "₦200000 × 0.01 = ₦2000.00");
    }
}
