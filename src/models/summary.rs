//! Aggregate totals for statutory filing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollBreakdown;

/// Sums of every [`PayrollBreakdown`] field across a payroll run.
///
/// Aggregation is plain addition, so the composition rule carries over:
/// `total_net_pay + total_deductions == total_gross_pay`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll_breakdown;
/// use payroll_engine::config::StatutoryConfig;
/// use payroll_engine::models::{CompensationInput, PayrollSummary, TaxPolicy};
/// use rust_decimal::Decimal;
///
/// let config = StatutoryConfig::nigeria_2024();
/// let breakdowns: Vec<_> = [100_000, 250_000]
///     .into_iter()
///     .map(|basic| {
///         let input = CompensationInput::basic_only(Decimal::new(basic, 0)).unwrap();
///         compute_payroll_breakdown(&input, &config, TaxPolicy::GROSS).unwrap()
///     })
///     .collect();
///
/// let summary: PayrollSummary = breakdowns.iter().collect();
/// assert_eq!(summary.employee_count, 2);
/// assert_eq!(summary.total_gross_pay, Decimal::new(350_000, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// Number of breakdowns included.
    pub employee_count: u32,
    /// Total gross pay.
    pub total_gross_pay: Decimal,
    /// Total PAYE withheld.
    pub total_paye: Decimal,
    /// Total pension contributions.
    pub total_pension: Decimal,
    /// Total NHF contributions.
    pub total_nhf: Decimal,
    /// Total NSITF contributions.
    pub total_nsitf: Decimal,
    /// Total ITF levies.
    pub total_itf: Decimal,
    /// Total of all deductions.
    pub total_deductions: Decimal,
    /// Total net pay.
    pub total_net_pay: Decimal,
}

impl PayrollSummary {
    /// Adds one breakdown to the totals.
    pub fn add(&mut self, breakdown: &PayrollBreakdown) {
        self.employee_count += 1;
        self.total_gross_pay += breakdown.gross_pay;
        self.total_paye += breakdown.paye_tax;
        self.total_pension += breakdown.pension_contribution;
        self.total_nhf += breakdown.nhf_contribution;
        self.total_nsitf += breakdown.nsitf_contribution;
        self.total_itf += breakdown.itf_contribution;
        self.total_deductions += breakdown.total_deductions;
        self.total_net_pay += breakdown.net_pay;
    }
}

impl<'a> Extend<&'a PayrollBreakdown> for PayrollSummary {
    fn extend<I: IntoIterator<Item = &'a PayrollBreakdown>>(&mut self, iter: I) {
        for breakdown in iter {
            self.add(breakdown);
        }
    }
}

impl<'a> FromIterator<&'a PayrollBreakdown> for PayrollSummary {
    fn from_iter<I: IntoIterator<Item = &'a PayrollBreakdown>>(iter: I) -> Self {
        let mut summary = Self::default();
        summary.extend(iter);
        summary
    }
}
