//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading settings, persisting
//! rates, or calculating payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/config.json".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/config.json");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path (or setting name) that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration file could not be written.
    #[error("Failed to write configuration file '{path}': {message}")]
    ConfigWriteError {
        /// The path that could not be written.
        path: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// A consumption-tax rate was outside the accepted range.
    #[error("Invalid rate '{field}': {message}")]
    InvalidRate {
        /// The rate that was invalid (e.g. "cbs_rate").
        field: String,
        /// A description of what made the rate invalid.
        message: String,
    },

    /// A calculation input was invalid.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A bracket table could not answer a lookup or is malformed.
    #[error("Tax table '{table}' error: {message}")]
    TableError {
        /// The version label of the table.
        table: String,
        /// A description of the table problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
