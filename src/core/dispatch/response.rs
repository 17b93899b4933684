//! Response shaping.
//!
//! Handler results and dispatch errors are wrapped in a [`ToolResponse`],
//! which carries the status code and either a JSON document, plain text, or
//! an RFC 9457 problem-details document.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::domains::tools::{FieldViolation, ToolError};

/// Media type of problem-details bodies.
pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";

/// RFC 9457 problem details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            status: status.as_u16(),
            detail: detail.into(),
            instance: None,
            errors: Vec::new(),
        }
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Problem document describing a dispatch or handler error.
    pub fn from_error(error: &ToolError) -> Self {
        let status = status_for(error);
        let mut problem = Self::new(status, error.to_string());
        if let ToolError::Validation(violations) = error {
            problem.title = "Invalid Parameters".to_string();
            problem.errors = violations.clone();
        }
        problem
    }
}

/// HTTP status code for a dispatch or handler error.
pub fn status_for(error: &ToolError) -> StatusCode {
    match error {
        ToolError::RouteNotFound(_) => StatusCode::NOT_FOUND,
        ToolError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        ToolError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        ToolError::Validation(_)
        | ToolError::MalformedBody(_)
        | ToolError::InvalidArguments(_) => StatusCode::BAD_REQUEST,
        ToolError::Registration(_) | ToolError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body of a [`ToolResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Problem(ProblemDetails),
}

/// Transport-level response to a tool request.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

impl ToolResponse {
    /// 200 with a JSON body.
    pub fn ok(value: Value) -> Self {
        Self::json(StatusCode::OK, value)
    }

    pub fn json(status: StatusCode, value: Value) -> Self {
        Self {
            status,
            body: ResponseBody::Json(value),
        }
    }

    pub fn text(status: StatusCode, text: impl Into<String>) -> Self {
        Self {
            status,
            body: ResponseBody::Text(text.into()),
        }
    }

    pub fn problem(problem: ProblemDetails) -> Self {
        Self {
            status: StatusCode::from_u16(problem.status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: ResponseBody::Problem(problem),
        }
    }

    /// Problem-details response for an error raised while serving `path`.
    pub fn from_error(error: &ToolError, path: &str) -> Self {
        Self::problem(ProblemDetails::from_error(error).with_instance(path))
    }

    /// JSON body, if any.
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl IntoResponse for ToolResponse {
    fn into_response(self) -> Response {
        match self.body {
            ResponseBody::Json(value) => (self.status, Json(value)).into_response(),
            ResponseBody::Text(text) => (self.status, text).into_response(),
            ResponseBody::Problem(problem) => (
                self.status,
                [(header::CONTENT_TYPE, PROBLEM_JSON_CONTENT_TYPE)],
                Json(problem),
            )
                .into_response(),
        }
    }
}
