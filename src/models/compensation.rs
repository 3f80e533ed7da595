//! Compensation input and tax policy models.
//!
//! A [`CompensationInput`] is the validated monthly snapshot the engine
//! computes from. It can only be built through its constructors, so every
//! value that reaches the calculation functions is non-negative and within
//! the supported range.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted monthly amount (₦1 trillion).
///
/// Keeps annualised figures far inside `Decimal`'s range.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Selects which PAYE variant to apply.
///
/// With `apply_consolidated_relief` off, brackets are applied to annual
/// gross income. With it on, the Consolidated Relief Allowance is
/// subtracted from annual gross first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Whether to deduct the Consolidated Relief Allowance before bracketing.
    pub apply_consolidated_relief: bool,
}

impl TaxPolicy {
    /// Bracket walk over annual gross income.
    pub const GROSS: TaxPolicy = TaxPolicy {
        apply_consolidated_relief: false,
    };

    /// Bracket walk over annual gross income less consolidated relief.
    pub const CONSOLIDATED_RELIEF: TaxPolicy = TaxPolicy {
        apply_consolidated_relief: true,
    };
}

/// Validated monthly compensation for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::CompensationInput;
/// use rust_decimal::Decimal;
///
/// let input = CompensationInput::new(Decimal::new(300_000, 0), Decimal::new(50_000, 0)).unwrap();
/// assert_eq!(input.gross_pay(), Decimal::new(350_000, 0));
///
/// assert!(CompensationInput::new(Decimal::NEGATIVE_ONE, Decimal::ZERO).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompensationInput {
    basic_salary: Decimal,
    allowances: Decimal,
}

impl CompensationInput {
    /// Validates and builds a compensation input.
    ///
    /// Fails with `InvalidInput` naming the offending field when an amount
    /// is negative or above [`MAX_MONTHLY_AMOUNT`].
    pub fn new(basic_salary: Decimal, allowances: Decimal) -> EngineResult<Self> {
        Ok(Self {
            basic_salary: validate_amount("basic_salary", basic_salary)?,
            allowances: validate_amount("allowances", allowances)?,
        })
    }

    /// Builds an input with no allowances.
    pub fn basic_only(basic_salary: Decimal) -> EngineResult<Self> {
        Self::new(basic_salary, Decimal::ZERO)
    }

    /// Builds an input from floating point amounts, rejecting NaN and infinities.
    ///
    /// ```
    /// use payroll_engine::models::CompensationInput;
    ///
    /// assert!(CompensationInput::from_f64(250_000.0, 0.0).is_ok());
    /// assert!(CompensationInput::from_f64(f64::NAN, 0.0).is_err());
    /// assert!(CompensationInput::from_f64(1.0, f64::INFINITY).is_err());
    /// ```
    pub fn from_f64(basic_salary: f64, allowances: f64) -> EngineResult<Self> {
        Self::new(
            decimal_from_f64("basic_salary", basic_salary)?,
            decimal_from_f64("allowances", allowances)?,
        )
    }

    /// Monthly basic salary.
    pub fn basic_salary(&self) -> Decimal {
        self.basic_salary
    }

    /// Monthly allowances.
    pub fn allowances(&self) -> Decimal {
        self.allowances
    }

    /// Monthly gross pay: basic salary plus allowances.
    pub fn gross_pay(&self) -> Decimal {
        self.basic_salary + self.allowances
    }
}

fn validate_amount(field: &str, value: Decimal) -> EngineResult<Decimal> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    if value > MAX_MONTHLY_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!(
                "{} exceeds the supported maximum of {}",
                value, MAX_MONTHLY_AMOUNT
            ),
        ));
    }
    // Collapse -0 so it never shows up in output.
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(value)
}

fn decimal_from_f64(field: &str, value: f64) -> EngineResult<Decimal> {
    if !value.is_finite() {
        return Err(EngineError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Decimal::from_f64(value).ok_or_else(|| {
        EngineError::invalid_input(field, format!("{} cannot be represented", value))
    })
}
