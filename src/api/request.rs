//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the
//! `/payroll/calculate` and `/payroll/run` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{InvalidRecordPolicy, PayrollRecord};
use crate::error::EngineResult;
use crate::models::{CompensationInput, PayrollPeriod, TaxPolicy};

/// Picks the caller's relief choice, falling back to the schedule default.
fn resolve_policy(apply_consolidated_relief: Option<bool>, default: TaxPolicy) -> TaxPolicy {
    apply_consolidated_relief
        .map(|apply_consolidated_relief| TaxPolicy {
            apply_consolidated_relief,
        })
        .unwrap_or(default)
}

/// Request body for the `/payroll/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee being paid.
    pub employee_id: String,
    /// The month being paid, as `"YYYY-MM"`.
    pub period: PayrollPeriod,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Overrides the schedule's relief policy when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_consolidated_relief: Option<bool>,
}

impl CalculationRequest {
    /// Validates the amounts into a [`CompensationInput`].
    pub fn to_input(&self) -> EngineResult<CompensationInput> {
        CompensationInput::new(self.basic_salary, self.allowances)
    }

    /// The relief policy to apply.
    pub fn policy(&self, default: TaxPolicy) -> TaxPolicy {
        resolve_policy(self.apply_consolidated_relief, default)
    }
}

/// Request body for the `/payroll/run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunRequest {
    /// The month being paid, as `"YYYY-MM"`.
    pub period: PayrollPeriod,
    /// One record per employee.
    pub employees: Vec<PayrollRecord>,
    /// Overrides the schedule's relief policy when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_consolidated_relief: Option<bool>,
    /// Whether invalid records are skipped or halt the run.
    #[serde(default)]
    pub on_invalid: InvalidRecordPolicy,
}

impl PayrollRunRequest {
    /// The relief policy to apply.
    pub fn policy(&self, default: TaxPolicy) -> TaxPolicy {
        resolve_policy(self.apply_consolidated_relief, default)
    }
}
