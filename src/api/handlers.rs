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
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_income_statement, calculate_payroll};
use crate::models::{IncomeStatementInput, PayrollInput, RateSet};

use super::request::{CalculationRequest, IncomeStatementRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, SaveRatesResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/income-statement", post(income_statement_handler))
        .route("/rates", get(get_rates_handler).put(save_rates_handler))
        .route("/tables", get(tables_handler))
        .with_state(state)
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

/// Maps a body extraction failure to the API error shape.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
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
    ApiErrorResponse::bad_request(error)
}

/// Handler for POST /calculate.
///
/// Uses the rates supplied with the request, or the session rates when none
/// are given.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(rejection_error(correlation_id, rejection)),
    };

    let rates = request.rates.unwrap_or_else(|| state.rates());
    let treatment = request
        .consumption_tax_treatment
        .unwrap_or_else(|| state.treatment());
    let input = PayrollInput::from(&request);

    let start_time = Instant::now();
    match calculate_payroll(&input, &rates, treatment, state.tables()) {
        Ok(result) => {
            let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);
            info!(
                correlation_id = %correlation_id,
                gross_salary = %result.gross,
                net = %result.net,
                cbs_rate = %rates.cbs_rate,
                ibs_rate = %rates.ibs_rate,
                duration_us,
                "Calculation completed successfully"
            );
            json_ok(CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                duration_us,
                result,
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /income-statement.
async fn income_statement_handler(
    State(state): State<AppState>,
    payload: Result<Json<IncomeStatementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing income statement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(rejection_error(correlation_id, rejection)),
    };

    let rates = request.rates.unwrap_or_else(|| state.rates());
    let input = IncomeStatementInput::from(&request);

    match calculate_income_statement(&input, &rates) {
        Ok(statement) => {
            info!(
                correlation_id = %correlation_id,
                gross_revenue = %statement.gross_revenue,
                net_profit = %statement.net_profit,
                "Income statement completed successfully"
            );
            json_ok(statement)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Income statement failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /rates.
async fn get_rates_handler(State(state): State<AppState>) -> Response {
    json_ok(state.rates())
}

/// Handler for PUT /rates, the "save rates" action.
///
/// Valid rates always replace the session rates. If persisting them fails
/// the response is `RATES_NOT_PERSISTED`, but the session keeps the new
/// values.
async fn save_rates_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateSet>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing save rates request");

    let rates = match payload {
        Ok(Json(rates)) => rates,
        Err(rejection) => return error_response(rejection_error(correlation_id, rejection)),
    };

    if let Err(err) = rates.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Rejected rates"
        );
        return error_response(err.into());
    }

    state.set_rates(rates);

    match state.store().save(&rates) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                cbs_rate = %rates.cbs_rate,
                ibs_rate = %rates.ibs_rate,
                "Rates saved"
            );
            json_ok(SaveRatesResponse {
                rates,
                path: state.store().path().display().to_string(),
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Rates applied to session but not persisted"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /tables.
async fn tables_handler(State(state): State<AppState>) -> Response {
    json_ok(*state.tables())
}
