//! Inbound tool request.

use axum::http::{HeaderMap, Method};
use serde_json::Value;

/// Parsed state of a request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body, or only whitespace.
    Empty,
    /// A well-formed JSON document.
    Json(Value),
    /// Bytes that are not valid JSON, with the parse error.
    Malformed(String),
}

impl RequestBody {
    /// Parse raw body bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(e) => Self::Malformed(e.to_string()),
        }
    }

    /// The JSON document, if the body held one.
    pub fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// A call received from the platform.
#[derive(Debug, Clone)]
pub struct ToolRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl ToolRequest {
    pub fn new(
        method: Method,
        path: impl Into<String>,
        headers: HeaderMap,
        body: impl Into<RequestBody>,
    ) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
            body: body.into(),
        }
    }

    /// A POST with a JSON body and no headers.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path, HeaderMap::new(), body)
    }
}
