//! Tool server implementation and lifecycle management.
//!
//! The [`ToolServer`] ties together the tool registry, the configured
//! dispatcher and the authorization hook. Transports hand it a
//! [`ToolRequest`] and get back a [`ToolResponse`].

use std::sync::Arc;

use tracing::{info, instrument};

use super::config::Config;
use super::dispatch::{
    DeclarativeDispatcher, DispatchMode, Dispatcher, ManualDispatcher, ToolRequest, ToolResponse,
    status_for,
};
use super::error::Result;
use super::security::{AuthDecision, Authorizer, BearerTokenAuthorizer};
use super::settings::InMemorySettingsStore;
use crate::domains::tools::{ToolError, ToolRegistry};
use crate::domains::tools::definitions::SystemClock;

/// The main tool server handler.
#[derive(Clone)]
pub struct ToolServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, shared with the dispatcher.
    registry: Arc<ToolRegistry>,

    /// Routing strategy selected by configuration.
    dispatcher: Arc<dyn Dispatcher>,

    /// Check run before every dispatched request.
    authorizer: Arc<dyn Authorizer>,
}

impl ToolServer {
    /// Create a server with the bundled tools and bearer token authorization
    /// backed by the configured settings.
    pub fn new(config: Config) -> Result<Self> {
        let registry = ToolRegistry::with_default_tools(Arc::new(SystemClock))?;
        let settings = Arc::new(InMemorySettingsStore::from_config(&config));
        let authorizer = Arc::new(BearerTokenAuthorizer::new(settings));

        Self::with_components(config, registry, authorizer)
    }

    /// Create a server from explicit parts.
    pub fn with_components(
        config: Config,
        registry: ToolRegistry,
        authorizer: Arc<dyn Authorizer>,
    ) -> Result<Self> {
        let registry = Arc::new(registry);
        let dispatcher: Arc<dyn Dispatcher> = match config.dispatch.mode {
            DispatchMode::Declarative => Arc::new(DeclarativeDispatcher::new(registry.clone())?),
            DispatchMode::Manual => Arc::new(ManualDispatcher::new(registry.clone())),
        };

        info!(
            tools = registry.len(),
            mode = %dispatcher.mode(),
            "Tool server initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            registry,
            dispatcher,
            authorizer,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Registered tools.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Active dispatcher.
    pub fn dispatcher(&self) -> &Arc<dyn Dispatcher> {
        &self.dispatcher
    }

    /// Whether the server can take tool calls.
    pub async fn is_ready(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Authorize and dispatch a request.
    #[instrument(skip_all, fields(method = %request.method, path = %request.path))]
    pub async fn handle(&self, request: ToolRequest) -> ToolResponse {
        if let AuthDecision::Deny(reason) = self.authorizer.authorize(&request).await {
            let error = ToolError::Unauthorized(reason);
            return ToolResponse::text(status_for(&error), error.to_string());
        }

        self.dispatcher.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::ResponseBody;
    use crate::core::security::AllowAll;
    use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
    use serde_json::json;

    fn config_with(mode: DispatchMode, token: Option<&str>) -> Config {
        let mut config = Config::default();
        config.dispatch.mode = mode;
        config.auth.bearer_token = token.map(String::from);
        config
    }

    #[tokio::test]
    async fn test_new_uses_configured_mode() {
        let server = ToolServer::new(config_with(DispatchMode::Manual, None)).unwrap();
        assert_eq!(server.dispatcher().mode(), DispatchMode::Manual);
        assert!(server.is_ready().await);

        let server = ToolServer::new(Config::default()).unwrap();
        assert_eq!(server.dispatcher().mode(), DispatchMode::Declarative);
    }

    #[tokio::test]
    async fn test_bearer_token_enforced() {
        let server = ToolServer::new(config_with(DispatchMode::Declarative, Some("s3cret"))).unwrap();

        let response = server
            .handle(ToolRequest::post("/tools/greeting", json!({ "name": "Bo" })))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body,
            ResponseBody::Text("Invalid or missing bearer token".to_string())
        );

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer s3cret"),
        );
        let request = ToolRequest::new(
            Method::POST,
            "/tools/greeting",
            headers,
            json!({ "name": "Bo" }),
        );
        assert_eq!(server.handle(request).await.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_registry_not_ready() {
        let server = ToolServer::with_components(
            Config::default(),
            ToolRegistry::new(),
            Arc::new(AllowAll),
        )
        .unwrap();
        assert!(!server.is_ready().await);
    }

    #[test]
    fn test_discovery_matches_routes_in_both_modes() {
        for mode in [DispatchMode::Declarative, DispatchMode::Manual] {
            let server = ToolServer::new(config_with(mode, None)).unwrap();
            let functions = server.registry().discovery().functions;
            assert!(!functions.is_empty());
            for function in functions {
                assert!(server.dispatcher().routes_to_tool(&function.endpoint));
            }
        }
    }
}
