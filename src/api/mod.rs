//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for computing single payroll
//! breakdowns, running a batch, and publishing the loaded tax schedule.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, PayrollRunRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
