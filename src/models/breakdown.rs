//! Payroll breakdown model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory breakdown of one employee's pay for one month.
///
/// Every field is rounded to two decimal places, and the composition rules
/// always hold exactly:
/// - `total_deductions` is the sum of the five deductions
/// - `net_pay + total_deductions == gross_pay`
///
/// `net_pay` is never clamped; a negative value is surfaced as-is so the
/// caller can flag the record.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll_breakdown;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{CompensationInput, TaxPolicy};
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput::new(Decimal::new(300_000, 0), Decimal::new(50_000, 0)).unwrap();
/// let breakdown =
///     compute_payroll_breakdown(&input, &StatutoryConfig::nigeria_2024(), TaxPolicy::GROSS)
///         .unwrap();
///
/// assert_eq!(breakdown.gross_pay, Decimal::new(350_000, 0));
/// assert_eq!(breakdown.net_pay + breakdown.total_deductions, breakdown.gross_pay);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Basic salary plus allowances.
    pub gross_pay: Decimal,
    /// Monthly PAYE income tax.
    pub paye_tax: Decimal,
    /// Employee pension contribution.
    pub pension_contribution: Decimal,
    /// National Housing Fund contribution.
    pub nhf_contribution: Decimal,
    /// Nigeria Social Insurance Trust Fund contribution.
    pub nsitf_contribution: Decimal,
    /// Industrial Training Fund levy.
    pub itf_contribution: Decimal,
    /// Sum of all five deductions.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions.
    pub net_pay: Decimal,
}

impl PayrollBreakdown {
    /// Sum of the four flat-rate deductions, excluding PAYE.
    pub fn statutory_contributions(&self) -> Decimal {
        self.pension_contribution
            + self.nhf_contribution
            + self.nsitf_contribution
            + self.itf_contribution
    }

    /// Returns true if deductions exceed gross pay.
    pub fn has_negative_net_pay(&self) -> bool {
        self.net_pay < Decimal::ZERO
    }
}
