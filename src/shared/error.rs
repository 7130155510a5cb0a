//! Shared Error Types
//!
//! Errors raised at the request-schema boundary, before anything reaches the
//! data-access layer. They are independent of axum so that domain types can
//! validate themselves without pulling in the HTTP stack.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - a request field failed validation
//!
//! # Usage
//!
//! ```rust
//! use crm_hrms::shared::error::SharedError;
//!
//! let error = SharedError::validation("end_date", "end_date must not precede start_date");
//! ```
use thiserror::Error;
use validator::ValidationErrors;

/// Errors shared by domain types and the HTTP layer
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

/// Collapse `validator` output into the first failing field
///
/// Field errors are sorted by name so the reported field is stable.
impl From<ValidationErrors> for SharedError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        match fields.first() {
            Some((field, errs)) => {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| {
                        errs.first()
                            .map(|e| format!("failed '{}' check", e.code))
                            .unwrap_or_else(|| "invalid value".to_string())
                    });
                Self::validation(field.to_string(), message)
            }
            None => Self::validation("body", errors.to_string()),
        }
    }
}
