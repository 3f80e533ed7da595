//! Statutory payroll engine for Nigeria
//!
//! This crate computes an employee's monthly payroll breakdown from basic
//! salary and allowances: progressive PAYE income tax, pension, National
//! Housing Fund, NSITF and ITF contributions, and net pay. Every amount is
//! held as a [`rust_decimal::Decimal`] and rounded half-up to kobo.
//!
//! # Example
//!
//! ```
//! use payroll_engine::calculation::compute_payroll_breakdown;
//! use payroll_engine::config::StatutoryConfig;
//! use payroll_engine::models::{CompensationInput, TaxPolicy};
//! use rust_decimal::Decimal;
//!
//! let config = StatutoryConfig::nigeria_2024();
//! let input = CompensationInput::new(Decimal::new(300_000, 0), Decimal::new(50_000, 0)).unwrap();
//! let breakdown = compute_payroll_breakdown(&input, &config, TaxPolicy::GROSS).unwrap();
//!
//! assert_eq!(breakdown.net_pay, Decimal::new(23_958_333, 2));
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
