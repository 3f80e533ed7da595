//! Core data models for the payroll engine.
//!
//! This module contains the validated compensation input, the breakdown and
//! summary outputs, the payroll period label, and the audit types.

mod breakdown;
mod compensation;
mod payroll_result;
mod period;
mod summary;

pub use breakdown::PayrollBreakdown;
pub use compensation::{CompensationInput, MAX_MONTHLY_AMOUNT, TaxPolicy};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, PayrollResult};
pub use period::PayrollPeriod;
pub use summary::PayrollSummary;
