//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, StatutoryConfig};

/// Shared application state.
///
/// Holds the loaded statutory schedule. The schedule is read-only after
/// startup, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded statutory schedule.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn loader(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the statutory schedule.
    pub fn config(&self) -> &StatutoryConfig {
        self.config.config()
    }
}
