//! Calculation logic for the payroll engine.
//!
//! This module contains the monetary rounding policy, the progressive PAYE
//! bracket walk, the consolidated relief allowance, the flat statutory
//! deductions (pension, NHF, NSITF, ITF), the composer that assembles a
//! payroll breakdown, and the batch payroll run.

mod composer;
mod deductions;
mod paye;
mod relief;
mod rounding;
mod run;

pub use composer::{PayrollCalculation, calculate_payroll, compute_payroll_breakdown};
pub use deductions::{
    DeductionKind, DeductionResult, StatutoryDeductions, calculate_itf, calculate_nhf,
    calculate_nsitf, calculate_pension, calculate_statutory_deductions,
};
pub use paye::{
    BracketCharge, MONTHS_PER_YEAR, PAYE_CLAUSE, PayeResult, calculate_annual_tax,
    calculate_monthly_paye, calculate_paye,
};
pub use relief::{
    CONSOLIDATED_RELIEF_CLAUSE, ReliefResult, apply_consolidated_relief, consolidated_relief,
};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use run::{
    InvalidRecordPolicy, PayrollRecord, PayrollRunOutcome, RejectedRecord, build_payroll_result,
    run_payroll,
};
