//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_payroll_result, run_payroll};
use crate::error::EngineError;

use super::request::{CalculationRequest, PayrollRunRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/run", post(run_handler))
        .route("/tax/schedule", get(schedule_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(error: EngineError) -> Response {
    let api_error: ApiErrorResponse = error.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // serde's message names the offending field
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /payroll/calculate.
///
/// Computes one employee's monthly breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let policy = request.policy(config.default_policy());
    let start_time = Instant::now();
    let outcome = request.to_input().and_then(|input| {
        build_payroll_result(&request.employee_id, request.period, &input, config, policy)
    });

    match outcome {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                period = %result.period,
                gross_pay = %result.breakdown.gross_pay,
                net_pay = %result.breakdown.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculation completed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                error = %err,
                "Payroll calculation failed"
            );
            engine_error_response(err)
        }
    }
}

/// Handler for POST /payroll/run.
///
/// Computes a batch and returns per-employee results with the summary.
async fn run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let policy = request.policy(config.default_policy());
    match run_payroll(
        request.period,
        &request.employees,
        config,
        policy,
        request.on_invalid,
    ) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %outcome.run_id,
                employees = outcome.summary.employee_count,
                rejected = outcome.rejected.len(),
                "Payroll run request completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Payroll run halted"
            );
            engine_error_response(err)
        }
    }
}

/// Handler for GET /tax/schedule.
async fn schedule_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config())
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        json!({
            "status": "ok",
            "engine_version": env!("CARGO_PKG_VERSION"),
            "schedule_code": state.loader().metadata().code,
        }),
    )
}
