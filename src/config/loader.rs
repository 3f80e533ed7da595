//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! schedules from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{DeductionConfig, PayeConfig, ScheduleMetadata, StatutoryConfig};

/// Loads and provides access to a statutory schedule.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// validates them into a [`StatutoryConfig`].
///
/// # Directory Structure
///
/// ```text
/// config/ng_paye_2024/
/// ├── schedule.yaml     # Schedule metadata
/// ├── paye.yaml         # PAYE brackets and consolidated relief
/// └── deductions.yaml   # Pension, NHF, NSITF and ITF rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ng_paye_2024").unwrap();
/// println!("Loaded schedule: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The parsed schedule breaks its invariants (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let paye = Self::load_yaml::<PayeConfig>(&path.join("paye.yaml"))?;
        let deductions = Self::load_yaml::<DeductionConfig>(&path.join("deductions.yaml"))?;

        let config = StatutoryConfig::new(metadata, paye, deductions)?;
        Ok(Self { config })
    }

    /// Wraps the built-in 2024 schedule.
    pub fn builtin() -> Self {
        Self::from(StatutoryConfig::nigeria_2024())
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.config.metadata()
    }
}

impl From<StatutoryConfig> for ConfigLoader {
    fn from(config: StatutoryConfig) -> Self {
        Self { config }
    }
}
