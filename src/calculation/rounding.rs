//! Monetary rounding policy.
//!
//! Every amount the engine reports is rounded to kobo (2 decimal places)
//! with midpoints rounded away from zero, which is round-half-up for the
//! non-negative amounts the engine produces.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on reported amounts.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to kobo, half-up, and fixes its scale at 2.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("66666.666").unwrap()).to_string(), "66666.67");
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()).to_string(), "0.13");
/// assert_eq!(round_money(Decimal::new(28_000, 0)).to_string(), "28000.00");
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(
        MONEY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(MONEY_DECIMAL_PLACES);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded
}
