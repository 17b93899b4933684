//! Tool-specific error types.

use serde::Serialize;
use thiserror::Error;

/// A single parameter that failed schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while routing or executing a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered at the requested path.
    #[error("No tool registered at {0}")]
    RouteNotFound(String),

    /// A tool exists at the path but not for the request method.
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    /// The pre-invocation authorization check denied the request.
    #[error("{0}")]
    Unauthorized(String),

    /// Extracted parameters do not satisfy the tool's schema.
    #[error("Parameter validation failed ({} violation(s))", .0.len())]
    Validation(Vec<FieldViolation>),

    /// The request body is not valid JSON.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The handler could not read its parameters.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A duplicate or otherwise inconsistent tool registration.
    #[error("Registration error: {0}")]
    Registration(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "route not found" error.
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound(path.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "registration" error.
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_counts_violations() {
        let err = ToolError::Validation(vec![
            FieldViolation::new("name", "is required"),
            FieldViolation::new("language", "must be of type string"),
        ]);
        assert_eq!(
            err.to_string(),
            "Parameter validation failed (2 violation(s))"
        );
    }

    #[test]
    fn test_unauthorized_displays_reason_only() {
        let err = ToolError::Unauthorized("Invalid or missing bearer token".into());
        assert_eq!(err.to_string(), "Invalid or missing bearer token");
    }
}
