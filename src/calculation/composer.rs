//! Payroll breakdown composition.
//!
//! Ties the gross pay, PAYE and flat deductions together into a single
//! [`PayrollBreakdown`], recording each rule in order.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, CompensationInput, PayrollBreakdown, TaxPolicy};

use super::deductions::calculate_statutory_deductions;
use super::paye::calculate_paye;
use super::rounding::round_money;

/// Breakdown plus the audit steps and warnings that produced it.
#[derive(Debug, Clone)]
pub struct PayrollCalculation {
    /// The computed breakdown.
    pub breakdown: PayrollBreakdown,
    /// Every rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Anomalies worth flagging to the caller.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the full payroll calculation for one employee-month.
///
/// Steps, in order: gross pay, consolidated relief (relief policy only),
/// PAYE, pension, NHF, NSITF, ITF, net pay. Gross pay is rounded to kobo
/// first and every deduction derives from that rounded figure, so
/// `net_pay + total_deductions == gross_pay` holds exactly.
///
/// A negative net pay is returned unchanged with a `NEGATIVE_NET_PAY`
/// warning.
pub fn calculate_payroll(
    input: &CompensationInput,
    config: &StatutoryConfig,
    policy: TaxPolicy,
) -> EngineResult<PayrollCalculation> {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let gross_pay = round_money(input.gross_pay());
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        clause_ref: "PITA s.3".to_string(),
        input: serde_json::json!({
            "basic_salary": input.basic_salary().normalize().to_string(),
            "allowances": input.allowances().normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "₦{} basic + ₦{} allowances = ₦{}",
            input.basic_salary().normalize(),
            input.allowances().normalize(),
            gross_pay
        ),
    });
    step_number += 1;

    let paye = calculate_paye(gross_pay, config, policy, step_number)?;
    step_number += paye.audit_steps.len() as u32;
    let paye_tax = paye.monthly_paye;
    audit_steps.extend(paye.audit_steps);

    let deductions = calculate_statutory_deductions(gross_pay, config.deductions(), step_number);
    step_number += 4;
    let pension_contribution = deductions.pension.amount;
    let nhf_contribution = deductions.nhf.amount;
    let nsitf_contribution = deductions.nsitf.amount;
    let itf_contribution = deductions.itf.amount;
    audit_steps.extend(deductions.into_audit_steps());

    let total_deductions =
        paye_tax + pension_contribution + nhf_contribution + nsitf_contribution + itf_contribution;
    let net_pay = round_money(gross_pay - total_deductions);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        clause_ref: "PITA s.81".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "paye_tax": paye_tax.to_string(),
            "pension_contribution": pension_contribution.to_string(),
            "nhf_contribution": nhf_contribution.to_string(),
            "nsitf_contribution": nsitf_contribution.to_string(),
            "itf_contribution": itf_contribution.to_string()
        }),
        output: serde_json::json!({
            "total_deductions": total_deductions.to_string(),
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "₦{} - ₦{} deductions = ₦{}",
            gross_pay, total_deductions, net_pay
        ),
    });

    if net_pay < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NEGATIVE_NET_PAY".to_string(),
            message: format!(
                "Deductions of ₦{} exceed gross pay of ₦{}",
                total_deductions, gross_pay
            ),
            severity: "high".to_string(),
        });
    }

    Ok(PayrollCalculation {
        breakdown: PayrollBreakdown {
            gross_pay,
            paye_tax,
            pension_contribution,
            nhf_contribution,
            nsitf_contribution,
            itf_contribution,
            total_deductions,
            net_pay,
        },
        audit_steps,
        warnings,
    })
}

/// Computes the payroll breakdown for one employee-month.
///
/// This is the engine's single operation: a pure function of the input,
/// schedule and policy. Calling it twice with the same arguments returns
/// identical breakdowns.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll_breakdown;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{CompensationInput, TaxPolicy};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let input = CompensationInput::new(Decimal::new(300_000, 0), Decimal::new(50_000, 0)).unwrap();
/// let breakdown =
///     compute_payroll_breakdown(&input, &StatutoryConfig::nigeria_2024(), TaxPolicy::GROSS)
///         .unwrap();
///
/// assert_eq!(breakdown.paye_tax, Decimal::from_str("66666.67").unwrap());
/// assert_eq!(breakdown.total_deductions, Decimal::from_str("110416.67").unwrap());
/// assert_eq!(breakdown.net_pay, Decimal::from_str("239583.33").unwrap());
/// ```
pub fn compute_payroll_breakdown(
    input: &CompensationInput,
    config: &StatutoryConfig,
    policy: TaxPolicy,
) -> EngineResult<PayrollBreakdown> {
    calculate_payroll(input, config, policy).map(|calculation| calculation.breakdown)
}
