//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod income_statement;
mod payroll;
mod rate_set;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use income_statement::{IncomeStatement, IncomeStatementInput};
pub use payroll::{
    ConsumptionTaxTreatment, InssSlice, IrrfDetail, MAX_AMOUNT, PayrollInput, PayrollResult,
    TableVersions,
};
pub use rate_set::{DEFAULT_CBS_RATE, DEFAULT_IBS_RATE, MAX_RATE, RATE_DECIMAL_PLACES, RateSet};
