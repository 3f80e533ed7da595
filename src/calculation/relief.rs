//! Consolidated Relief Allowance calculation.
//!
//! When the relief policy is selected, PAYE brackets apply to annual gross
//! income less this allowance rather than to annual gross income itself.

use rust_decimal::Decimal;

use crate::config::ConsolidatedRelief;
use crate::models::AuditStep;

/// Statutory reference for the Consolidated Relief Allowance.
pub const CONSOLIDATED_RELIEF_CLAUSE: &str = "PITA s.33(1)";

/// The result of computing the relief, including the audit step.
#[derive(Debug, Clone)]
pub struct ReliefResult {
    /// The relief amount, unrounded.
    pub relief: Decimal,
    /// Annual gross less relief, floored at zero.
    pub taxable_income: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the Consolidated Relief Allowance for an annual gross income.
///
/// Relief is the higher of the fixed minimum and `floor_rate` of gross,
/// plus `gross_rate` of gross.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::consolidated_relief;
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let params = &config.paye().consolidated_relief;
///
/// // max(200,000, 42,000) + 840,000
/// assert_eq!(consolidated_relief(Decimal::new(4_200_000, 0), params), Decimal::new(1_040_000, 0));
/// ```
pub fn consolidated_relief(annual_gross: Decimal, params: &ConsolidatedRelief) -> Decimal {
    let floor = params.minimum.max(annual_gross * params.floor_rate);
    floor + annual_gross * params.gross_rate
}

/// Applies the relief to an annual gross income and records the decision.
///
/// Taxable income never goes below zero, even when relief exceeds gross.
pub fn apply_consolidated_relief(
    annual_gross: Decimal,
    params: &ConsolidatedRelief,
    step_number: u32,
) -> ReliefResult {
    let floor_share = annual_gross * params.floor_rate;
    let floor_used = params.minimum.max(floor_share);
    let relief = consolidated_relief(annual_gross, params);
    let taxable_income = (annual_gross - relief).max(Decimal::ZERO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "consolidated_relief".to_string(),
        rule_name: "Consolidated Relief Allowance".to_string(),
        clause_ref: CONSOLIDATED_RELIEF_CLAUSE.to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "minimum": params.minimum.normalize().to_string(),
            "floor_rate": params.floor_rate.normalize().to_string(),
            "gross_rate": params.gross_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "relief": relief.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string(),
            "minimum_applied": floor_used == params.minimum
        }),
        reasoning: format!(
            "max(₦{}, ₦{}) + ₦{} = ₦{} relief; ₦{} - ₦{} = ₦{} taxable",
            params.minimum.normalize(),
            floor_share.normalize(),
            (annual_gross * params.gross_rate).normalize(),
            relief.normalize(),
            annual_gross.normalize(),
            relief.normalize(),
            taxable_income.normalize()
        ),
    };

    ReliefResult {
        relief,
        taxable_income,
        audit_step,
    }
}
