//! Payroll run workflow.
//!
//! A run computes every employee's breakdown independently, then sums the
//! successful breakdowns into a [`PayrollSummary`] for filing. Invalid
//! records are either skipped and reported, or halt the run, depending on
//! the caller's [`InvalidRecordPolicy`].

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, CompensationInput, PayrollPeriod, PayrollResult, PayrollSummary, TaxPolicy,
};

use super::composer::calculate_payroll;

/// What a run does when it meets an invalid record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Report the record as rejected and carry on.
    #[default]
    Skip,
    /// Stop the run and return the record's error.
    Halt,
}

/// One employee's compensation as supplied by the payroll workflow.
///
/// Fields are optional here so a missing value is reported as an invalid
/// record rather than failing the whole batch at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The employee being paid.
    pub employee_id: String,
    /// Monthly basic salary; required.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
    /// Monthly allowances; zero when absent.
    #[serde(default)]
    pub allowances: Option<Decimal>,
}

impl PayrollRecord {
    /// Creates a complete record.
    pub fn new(employee_id: impl Into<String>, basic_salary: Decimal, allowances: Decimal) -> Self {
        Self {
            employee_id: employee_id.into(),
            basic_salary: Some(basic_salary),
            allowances: Some(allowances),
        }
    }

    /// Validates the record into a [`CompensationInput`].
    ///
    /// ```
    /// use payroll_engine::calculation::PayrollRecord;
    ///
    /// let record = PayrollRecord {
    ///     employee_id: "emp_001".to_string(),
    ///     basic_salary: None,
    ///     allowances: None,
    /// };
    /// assert!(record.to_input().is_err());
    /// ```
    pub fn to_input(&self) -> EngineResult<CompensationInput> {
        if self.employee_id.trim().is_empty() {
            return Err(EngineError::invalid_input("employee_id", "must not be empty"));
        }
        let basic_salary = self
            .basic_salary
            .ok_or_else(|| EngineError::invalid_input("basic_salary", "is required"))?;
        CompensationInput::new(basic_salary, self.allowances.unwrap_or(Decimal::ZERO))
    }
}

/// A record left out of the run, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// Position of the record in the submitted batch.
    pub index: usize,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The offending field.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

/// Everything a payroll run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunOutcome {
    /// Unique identifier for the run.
    pub run_id: Uuid,
    /// The month being paid.
    pub period: PayrollPeriod,
    /// Code of the statutory schedule used.
    pub schedule_code: String,
    /// The PAYE variant applied to every employee.
    pub policy: TaxPolicy,
    /// One result per accepted record, in submission order.
    pub results: Vec<PayrollResult>,
    /// Records that were skipped.
    pub rejected: Vec<RejectedRecord>,
    /// Totals across `results`.
    pub summary: PayrollSummary,
}

/// Computes one employee's [`PayrollResult`].
///
/// Wraps [`calculate_payroll`] with a fresh calculation id, timestamp and
/// timing. The breakdown inside is deterministic; the envelope is not.
pub fn build_payroll_result(
    employee_id: &str,
    period: PayrollPeriod,
    input: &CompensationInput,
    config: &StatutoryConfig,
    policy: TaxPolicy,
) -> EngineResult<PayrollResult> {
    let start_time = Instant::now();
    let calculation = calculate_payroll(input, config, policy)?;
    let duration_us = start_time.elapsed().as_micros() as u64;

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee_id.to_string(),
        period,
        schedule_code: config.metadata().code.clone(),
        policy,
        breakdown: calculation.breakdown,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings: calculation.warnings,
            duration_us,
        },
    })
}

/// Runs payroll for a batch of employees.
///
/// Records are computed independently and in submission order. A valid
/// record whose employee id was already taken by an earlier valid record
/// counts as invalid; an invalid record never claims its id. The summary is built only once
/// every record has been processed.
///
/// # Errors
///
/// With [`InvalidRecordPolicy::Halt`], returns the first invalid record's
/// error with its field prefixed by `employees[index]`. With
/// [`InvalidRecordPolicy::Skip`] the run itself does not fail.
pub fn run_payroll(
    period: PayrollPeriod,
    records: &[PayrollRecord],
    config: &StatutoryConfig,
    policy: TaxPolicy,
    on_invalid: InvalidRecordPolicy,
) -> EngineResult<PayrollRunOutcome> {
    let run_id = Uuid::new_v4();
    info!(
        run_id = %run_id,
        period = %period,
        records = records.len(),
        consolidated_relief = policy.apply_consolidated_relief,
        "Starting payroll run"
    );

    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut results = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        // An id is claimed only by a record that passes validation.
        let outcome = record.to_input().and_then(|input| {
            if !seen.insert(record.employee_id.as_str()) {
                return Err(EngineError::invalid_input(
                    "employee_id",
                    "appears more than once in this run",
                ));
            }
            build_payroll_result(&record.employee_id, period, &input, config, policy)
        });

        match outcome {
            Ok(result) => {
                debug!(
                    run_id = %run_id,
                    employee_id = %record.employee_id,
                    net_pay = %result.breakdown.net_pay,
                    "Computed payroll record"
                );
                results.push(result);
            }
            Err(EngineError::InvalidInput { field, message }) => {
                warn!(
                    run_id = %run_id,
                    index,
                    employee_id = %record.employee_id,
                    field = %field,
                    message = %message,
                    "Invalid payroll record"
                );
                if on_invalid == InvalidRecordPolicy::Halt {
                    return Err(EngineError::InvalidInput {
                        field: format!("employees[{}].{}", index, field),
                        message: format!("employee '{}': {}", record.employee_id, message),
                    });
                }
                rejected.push(RejectedRecord {
                    index,
                    employee_id: record.employee_id.clone(),
                    field,
                    message,
                });
            }
            Err(other) => return Err(other),
        }
    }

    let summary: PayrollSummary = results.iter().map(|result| &result.breakdown).collect();
    info!(
        run_id = %run_id,
        computed = results.len(),
        rejected = rejected.len(),
        total_gross_pay = %summary.total_gross_pay,
        total_paye = %summary.total_paye,
        "Payroll run completed"
    );

    Ok(PayrollRunOutcome {
        run_id,
        period,
        schedule_code: config.metadata().code.clone(),
        policy,
        results,
        rejected,
        summary,
    })
}
