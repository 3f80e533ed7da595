//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load a statutory schedule from YAML
//! files: schedule metadata, PAYE brackets, consolidated relief parameters
//! and the flat-rate deductions.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ng_paye_2024").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CappedRate, ConsolidatedRelief, DeductionConfig, FlatRate, PayeConfig, ScheduleMetadata,
    StatutoryConfig, TaxBracket,
};
