//! Request dispatch.
//!
//! A [`Dispatcher`] turns an inbound [`ToolRequest`] into a [`ToolResponse`]:
//! it answers discovery, finds the tool bound to the request path, extracts
//! the parameters and invokes the handler. Two strategies are provided and
//! both are built from the same [`ToolRegistry`](crate::domains::tools::ToolRegistry):
//!
//! - [`DeclarativeDispatcher`]: `(endpoint, method)` map lookup with schema
//!   validation and problem-details errors.
//! - [`ManualDispatcher`]: a linear scan of endpoints in declaration order,
//!   no validation, and a fixed `Invalid path` error.

mod declarative;
mod manual;
mod request;
mod response;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use declarative::DeclarativeDispatcher;
pub use manual::{INVALID_PATH_MESSAGE, ManualDispatcher};
pub use request::{RequestBody, ToolRequest};
pub use response::{
    PROBLEM_JSON_CONTENT_TYPE, ProblemDetails, ResponseBody, ToolResponse, status_for,
};

/// Path answered with the discovery payload.
pub const DISCOVERY_PATH: &str = "/discovery";

/// Which dispatch strategy the server uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    #[default]
    Declarative,
    Manual,
}

impl DispatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Declarative => "declarative",
            Self::Manual => "manual",
        }
    }
}

impl std::str::FromStr for DispatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declarative" => Ok(Self::Declarative),
            "manual" => Ok(Self::Manual),
            other => Err(format!("unknown dispatch mode '{}'", other)),
        }
    }
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routes a request to a tool handler and shapes the response.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Strategy implemented by this dispatcher.
    fn mode(&self) -> DispatchMode;

    /// Whether `path` reaches a tool handler.
    fn routes_to_tool(&self, path: &str) -> bool;

    /// Handle one request.
    async fn dispatch(&self, request: ToolRequest) -> ToolResponse;
}
