//! Global application error types.
//!
//! This module defines the error type shared by the validators, the user
//! store and the HTTP layer, along with the per-field error record used to
//! report structural validation failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pseudo-field used for errors that are not tied to a single input field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Field-specific validation error details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Machine-readable constraint identifier (`required`, `min_length`, ...)
    pub code: String,
    /// Description of the validation failure
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {}", summarize(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Credentials did not resolve to a user. Deliberately carries no hint
    /// about which of the submitted fields was wrong.
    #[error("Authorization error: {message}")]
    Authorization { message: String },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    /// The user store could not be reached or failed mid-operation.
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn field(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, code, message)],
        }
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Stable category string used in API responses.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Authorization { .. } => "authorization",
            Self::NotFound { .. } => "not_found",
            Self::AlreadyExists { .. } => "already_exists",
            Self::Database { .. } => "dependency_unavailable",
            Self::InternalError { .. } => "internal_error",
        }
    }

    /// Names of the fields reported by a validation error, in report order.
    pub fn failing_fields(&self) -> Vec<&str> {
        match self {
            Self::Validation { errors } => {
                let mut fields: Vec<&str> = Vec::new();
                for error in errors {
                    if !fields.contains(&error.field.as_str()) {
                        fields.push(error.field.as_str());
                    }
                }
                fields
            }
            Self::Authorization { .. } => vec![NON_FIELD_ERRORS],
            _ => Vec::new(),
        }
    }
}
