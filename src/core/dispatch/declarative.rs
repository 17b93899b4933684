//! Metadata-driven dispatcher.
//!
//! The route table maps `(endpoint, method)` to a tool and is derived from the
//! registry when the dispatcher is built. Extracted parameters are validated
//! against the tool's parameter schema before the handler runs, and every
//! failure is reported as problem details.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::Method;
use serde_json::Value;
use tracing::{error, info, warn};

use super::{DISCOVERY_PATH, DispatchMode, Dispatcher, RequestBody, ToolRequest, ToolResponse};
use crate::domains::tools::{
    OptiIdAuthData, ToolError, ToolHandler, ToolRegistry, canonical_method, extract_parameters,
    validate_parameters,
};

type RouteKey = (String, Method);

/// Dispatcher backed by a route map built from tool metadata.
pub struct DeclarativeDispatcher {
    registry: Arc<ToolRegistry>,
    routes: HashMap<RouteKey, Arc<dyn ToolHandler>>,
}

impl DeclarativeDispatcher {
    /// Build the route table from the registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Result<Self, ToolError> {
        let mut routes = HashMap::with_capacity(registry.len());

        for tool in registry.tools() {
            let descriptor = tool.descriptor();
            let method = canonical_method(&descriptor.http_method).map_err(|reason| {
                ToolError::registration(format!("tool '{}' {}", descriptor.name, reason))
            })?;

            let key = (descriptor.endpoint.clone(), method);
            if let Some(previous) = routes.insert(key, tool.clone()) {
                return Err(ToolError::registration(format!(
                    "{} {} is bound to both '{}' and '{}'",
                    descriptor.http_method,
                    descriptor.endpoint,
                    previous.descriptor().name,
                    descriptor.name
                )));
            }
        }

        Ok(Self { registry, routes })
    }

    fn discovery(&self, request: &ToolRequest) -> ToolResponse {
        if request.method != Method::GET && request.method != Method::POST {
            return self.method_not_allowed(request);
        }
        match serde_json::to_value(self.registry.discovery()) {
            Ok(payload) => ToolResponse::ok(payload),
            Err(e) => ToolResponse::from_error(&ToolError::internal(e.to_string()), &request.path),
        }
    }

    fn method_not_allowed(&self, request: &ToolRequest) -> ToolResponse {
        warn!(method = %request.method, path = %request.path, "Method not allowed");
        ToolResponse::from_error(
            &ToolError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.clone(),
            },
            &request.path,
        )
    }
}

#[async_trait]
impl Dispatcher for DeclarativeDispatcher {
    fn mode(&self) -> DispatchMode {
        DispatchMode::Declarative
    }

    fn routes_to_tool(&self, path: &str) -> bool {
        self.routes.keys().any(|(endpoint, _)| endpoint == path)
    }

    async fn dispatch(&self, request: ToolRequest) -> ToolResponse {
        if request.path == DISCOVERY_PATH {
            return self.discovery(&request);
        }

        let key = (request.path.clone(), request.method.clone());
        let Some(tool) = self.routes.get(&key) else {
            if self.routes_to_tool(&request.path) {
                return self.method_not_allowed(&request);
            }
            warn!(path = %request.path, "No tool registered at path");
            return ToolResponse::from_error(
                &ToolError::route_not_found(&request.path),
                &request.path,
            );
        };
        let descriptor = tool.descriptor();

        if let RequestBody::Malformed(reason) = &request.body {
            warn!(tool = %descriptor.name, "Rejecting malformed JSON body: {}", reason);
            return ToolResponse::from_error(
                &ToolError::MalformedBody(reason.clone()),
                &request.path,
            );
        }

        let body = request.body.json();
        let parameters = match extract_parameters(body) {
            Value::Null => Value::Object(Default::default()),
            parameters => parameters,
        };

        if let Err(violations) = validate_parameters(&parameters, &descriptor.parameters) {
            warn!(
                tool = %descriptor.name,
                violations = violations.len(),
                "Parameter validation failed"
            );
            return ToolResponse::from_error(&ToolError::Validation(violations), &request.path);
        }

        info!(tool = %descriptor.name, "Dispatching tool call");
        match tool.call(parameters, OptiIdAuthData::from_body(body)).await {
            Ok(result) => ToolResponse::ok(result),
            Err(e) => {
                error!(tool = %descriptor.name, "Tool handler failed: {}", e);
                ToolResponse::from_error(&e, &request.path)
            }
        }
    }
}
