//! Brazilian payroll engine.
//!
//! This crate calculates the monthly payroll deductions of an employee
//! (progressive INSS, IRRF withholding, informational FGTS) and simulates the
//! CBS and IBS consumption taxes introduced by the tax reform at operator
//! adjustable rates. The rates are persisted to a small JSON document and
//! the whole engine is exposed over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
