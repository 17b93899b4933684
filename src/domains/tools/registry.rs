//! Tool Registry - the single source of truth for deployed tools.
//!
//! Both dispatchers and the discovery responder read from this registry, so
//! the published tool list and the routing table cannot drift apart.
//! When adding a new tool:
//! 1. Create the tool file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in [`ToolRegistry::with_default_tools`]

use std::sync::Arc;

use axum::http::Method;
use tracing::debug;

use super::definition::{DefinedTool, ToolDefinition, ToolHandler};
use super::definitions::{Clock, GreetingTool, TodaysDateTool};
use super::descriptor::DiscoveryPayload;
use super::error::ToolError;

/// Ordered, immutable-after-startup collection of tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the bundled example tools.
    pub fn with_default_tools(clock: Arc<dyn Clock>) -> Result<Self, ToolError> {
        Self::new()
            .register(GreetingTool::new())?
            .register(TodaysDateTool::new(clock))
    }

    /// Add a tool. Names and endpoints must be unique, and the declared
    /// method must be a valid uppercase HTTP method.
    pub fn register<T: ToolDefinition>(self, tool: T) -> Result<Self, ToolError> {
        self.register_handler(Arc::new(DefinedTool::new(tool)))
    }

    /// Add an already type-erased tool.
    pub fn register_handler(mut self, handler: Arc<dyn ToolHandler>) -> Result<Self, ToolError> {
        let new = handler.descriptor();
        let method = canonical_method(&new.http_method).map_err(|reason| {
            ToolError::registration(format!("tool '{}' {}", new.name, reason))
        })?;

        // The manual dispatcher matches on path alone, so an endpoint can only
        // be bound once whatever the method.
        for existing in self.tools.iter().map(|t| t.descriptor()) {
            if existing.name == new.name {
                return Err(ToolError::registration(format!(
                    "duplicate tool name '{}'",
                    new.name
                )));
            }
            if existing.endpoint == new.endpoint {
                return Err(ToolError::registration(format!(
                    "{} {} is already bound to tool '{}'",
                    method, new.endpoint, existing.name
                )));
            }
        }

        debug!(tool = %new.name, endpoint = %new.endpoint, "Registered tool");
        self.tools.push(handler);
        Ok(self)
    }

    /// All tools in registration order.
    pub fn tools(&self) -> &[Arc<dyn ToolHandler>] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Discovery document listing every registered tool.
    pub fn discovery(&self) -> DiscoveryPayload {
        DiscoveryPayload {
            functions: self
                .tools
                .iter()
                .map(|t| t.descriptor().clone())
                .collect(),
        }
    }
}

/// Parse a declared method, accepting only its canonical uppercase spelling.
pub(crate) fn canonical_method(declared: &str) -> Result<Method, String> {
    let method = Method::from_bytes(declared.to_uppercase().as_bytes())
        .map_err(|e| format!("declares invalid method '{}': {}", declared, e))?;
    if method.as_str() != declared {
        return Err(format!(
            "declares method '{}'; use '{}'",
            declared,
            method.as_str()
        ));
    }
    Ok(method)
}
