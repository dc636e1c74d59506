//! Error handling for CutKit
//!
//! A single error taxonomy covers every failure an optimization run can
//! surface: missing records, invalid inputs, an infeasible search range,
//! numeric breakdown in the evaluator, and cooperative cancellation.
//! External advice-generator failures are absorbed by the facade and never
//! appear here.

use thiserror::Error;

/// Optimization error type
///
/// The primary error type used in public APIs of the core and the
/// optimizer crates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// A referenced record does not exist
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// A supplied value is outside its validity range
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The planner narrowed an axis to an empty interval
    #[error("infeasible search range on {axis} axis: lower {lower} exceeds upper {upper}")]
    Infeasible {
        axis: &'static str,
        lower: f64,
        upper: f64,
    },

    /// A non-finite quantity appeared during the final evaluation
    #[error("numeric failure: {detail}")]
    Numeric { detail: String },

    /// A cooperative cancellation signal fired
    #[error("optimization cancelled")]
    Cancelled,
}

impl OptimizeError {
    /// Create a not-found error for a record kind and id
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        OptimizeError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create an invalid-input error for a named field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        OptimizeError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, OptimizeError::NotFound { .. })
    }

    /// Check if this is an infeasible-range error
    pub fn is_infeasible(&self) -> bool {
        matches!(self, OptimizeError::Infeasible { .. })
    }
}

/// Result type using OptimizeError
pub type Result<T> = std::result::Result<T, OptimizeError>;
