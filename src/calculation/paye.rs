//! PAYE income tax calculation.
//!
//! This module walks the progressive bracket table over annual taxable
//! income and converts the annual liability into the monthly amount
//! withheld from pay.

use rust_decimal::Decimal;

use crate::config::{StatutoryConfig, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxPolicy};

use super::relief::apply_consolidated_relief;
use super::rounding::round_money;

/// Statutory reference for the PAYE bracket schedule.
pub const PAYE_CLAUSE: &str = "PITA Sixth Schedule";

/// Months in a tax year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Tax charged within a single bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketCharge {
    /// The bracket applied.
    pub bracket: TaxBracket,
    /// Portion of income falling inside the bracket.
    pub taxable: Decimal,
    /// `taxable * rate`.
    pub tax: Decimal,
}

/// The result of a PAYE calculation, including the audit steps.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Monthly gross pay times twelve.
    pub annual_gross: Decimal,
    /// Income the brackets were applied to.
    pub annual_taxable_income: Decimal,
    /// Unrounded annual tax.
    pub annual_tax: Decimal,
    /// Annual tax divided by twelve, rounded to kobo.
    pub monthly_paye: Decimal,
    /// Per-bracket detail, for brackets the income reaches.
    pub charges: Vec<BracketCharge>,
    /// Relief and PAYE steps, in order.
    pub audit_steps: Vec<AuditStep>,
}

fn check_income(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", amount),
        ));
    }
    Ok(())
}

/// Splits income across the brackets it reaches.
fn bracket_charges(income: Decimal, brackets: &[TaxBracket]) -> Vec<BracketCharge> {
    brackets
        .iter()
        .filter(|bracket| income > bracket.lower)
        .map(|bracket| {
            let taxable = bracket.taxable_portion(income);
            BracketCharge {
                bracket: bracket.clone(),
                taxable,
                tax: taxable * bracket.rate,
            }
        })
        .collect()
}

/// Computes the annual tax owed on `annual_taxable_income`.
///
/// Each bracket taxes the part of income inside `[lower, upper)` at its
/// rate; income beyond the last finite bound is taxed at the top rate
/// without a ceiling. The result is not rounded.
///
/// # Errors
///
/// Returns `InvalidInput` if the income is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_annual_tax;
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let tax = calculate_annual_tax(Decimal::new(300_000, 0), config.brackets()).unwrap();
/// assert_eq!(tax, Decimal::new(21_000, 0));
///
/// let tax = calculate_annual_tax(Decimal::new(300_001, 0), config.brackets()).unwrap();
/// assert_eq!(tax, Decimal::new(2_100_011, 2));
/// ```
pub fn calculate_annual_tax(
    annual_taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> EngineResult<Decimal> {
    check_income("annual_taxable_income", annual_taxable_income)?;
    Ok(bracket_charges(annual_taxable_income, brackets)
        .iter()
        .map(|charge| charge.tax)
        .sum())
}

/// Computes the monthly PAYE for an annual taxable income.
///
/// The annual tax is divided by twelve and rounded to kobo, half-up.
///
/// ```
/// use payroll_engine::calculation::calculate_monthly_paye;
/// use payroll_engine::config::StatutoryConfig;
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let paye = calculate_monthly_paye(Decimal::new(4_200_000, 0), config.brackets()).unwrap();
/// assert_eq!(paye, Decimal::new(6_666_667, 2));
/// ```
pub fn calculate_monthly_paye(
    annual_taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> EngineResult<Decimal> {
    let annual_tax = calculate_annual_tax(annual_taxable_income, brackets)?;
    Ok(round_money(annual_tax / MONTHS_PER_YEAR))
}

/// Computes monthly PAYE from monthly gross pay under the given policy.
///
/// Monthly gross is annualised; with the relief policy the Consolidated
/// Relief Allowance is subtracted before the bracket walk. Emits a relief
/// step (when applied) followed by the PAYE step.
///
/// # Errors
///
/// Returns `InvalidInput` on field `monthly_gross` if it is negative or too
/// large to annualise.
pub fn calculate_paye(
    monthly_gross: Decimal,
    config: &StatutoryConfig,
    policy: TaxPolicy,
    step_number: u32,
) -> EngineResult<PayeResult> {
    check_income("monthly_gross", monthly_gross)?;

    let annual_gross = monthly_gross.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        EngineError::invalid_input(
            "monthly_gross",
            format!("{} is too large to annualise", monthly_gross),
        )
    })?;
    let mut audit_steps = Vec::new();
    let mut step_number = step_number;

    let annual_taxable_income = if policy.apply_consolidated_relief {
        let relief = apply_consolidated_relief(
            annual_gross,
            &config.paye().consolidated_relief,
            step_number,
        );
        audit_steps.push(relief.audit_step);
        step_number += 1;
        relief.taxable_income
    } else {
        annual_gross
    };

    let charges = bracket_charges(annual_taxable_income, config.brackets());
    let annual_tax: Decimal = charges.iter().map(|charge| charge.tax).sum();
    let monthly_paye = round_money(annual_tax / MONTHS_PER_YEAR);

    let bands: Vec<serde_json::Value> = charges
        .iter()
        .map(|charge| {
            serde_json::json!({
                "lower": charge.bracket.lower.normalize().to_string(),
                "upper": charge.bracket.upper.map(|u| u.normalize().to_string()),
                "rate": charge.bracket.rate.normalize().to_string(),
                "taxable": charge.taxable.normalize().to_string(),
                "tax": charge.tax.normalize().to_string()
            })
        })
        .collect();

    let band_text: Vec<String> = charges
        .iter()
        .map(|charge| {
            format!(
                "₦{} × {}",
                charge.taxable.normalize(),
                charge.bracket.rate.normalize()
            )
        })
        .collect();
    let reasoning = if charges.is_empty() {
        "No taxable income - PAYE is ₦0".to_string()
    } else {
        format!(
            "{} = ₦{} annual; ÷ 12 = ₦{} monthly",
            band_text.join(" + "),
            annual_tax.normalize(),
            monthly_paye
        )
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        clause_ref: PAYE_CLAUSE.to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.normalize().to_string(),
            "annual_gross": annual_gross.normalize().to_string(),
            "annual_taxable_income": annual_taxable_income.normalize().to_string(),
            "consolidated_relief_applied": policy.apply_consolidated_relief
        }),
        output: serde_json::json!({
            "bands": bands,
            "annual_tax": annual_tax.normalize().to_string(),
            "monthly_paye": monthly_paye.to_string()
        }),
        reasoning,
    });

    Ok(PayeResult {
        annual_gross,
        annual_taxable_income,
        annual_tax,
        monthly_paye,
        charges,
        audit_steps,
    })
}
