//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints that stand in for the payroll
//! form: salary input, rate edits with a "save rates" action, and the
//! itemized breakdown.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, IncomeStatementRequest};
pub use response::{ApiError, CalculationResponse, SaveRatesResponse};
pub use state::AppState;
