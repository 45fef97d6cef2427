//! Error types for the Payroll Export Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every anomaly the export pipeline can report. None of these are
//! recovered from inside the engine; they always reach the caller.

use thiserror::Error;

/// The main error type for the Payroll Export Engine.
///
/// # Example
///
/// ```
/// use payroll_export::error::ExportError;
///
/// let error = ExportError::EmptyInput {
///     transaction_id: "8f2c41d0".to_string(),
/// };
/// assert_eq!(error.to_string(), "No payroll lines to export for transaction '8f2c41d0'");
/// ```
#[derive(Debug, Error)]
pub enum ExportError {
    /// A line carried neither an employee id nor an employee name, or lacked
    /// an id while the strict identity policy is active.
    #[error("Payroll line {line_index} has no usable employee identity: {message}")]
    MissingIdentity {
        /// Zero-based position of the offending line in the input snapshot.
        line_index: usize,
        /// What was missing.
        message: String,
    },

    /// There was nothing to export after partitioning.
    #[error("No payroll lines to export for transaction '{transaction_id}'")]
    EmptyInput {
        /// The transaction the export was requested for.
        transaction_id: String,
    },

    /// A line carried a factor other than +1 or -1, or none at all.
    #[error(
        "Unknown factor {} for concept '{concept}' of employee '{employee_key}'",
        describe_factor(.factor)
    )]
    AmbiguousFactor {
        /// The identity key of the employee the line belongs to.
        employee_key: String,
        /// The concept name on the line.
        concept: String,
        /// The factor value that was received; `None` when it was null.
        factor: Option<i64>,
    },

    /// Summing amounts exceeded the range of a decimal.
    #[error("Amount overflow in '{concept}' for employee '{employee_key}'")]
    AmountOverflow {
        /// The identity key of the employee being summed.
        employee_key: String,
        /// The concept column or total that overflowed.
        concept: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The workbook could not be serialized.
    #[error("Spreadsheet error: {message}")]
    Spreadsheet {
        /// A description of the serialization failure.
        message: String,
    },
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Spreadsheet {
            message: error.to_string(),
        }
    }
}

fn describe_factor(factor: &Option<i64>) -> String {
    match factor {
        Some(value) => value.to_string(),
        None => "null".to_string(),
    }
}

/// A type alias for Results that return ExportError.
pub type ExportResult<T> = Result<T, ExportError>;
