//! HTTP transport implementation.
//!
//! Every request except the liveness and readiness probes lands on a single
//! entry point, which converts it into a [`ToolRequest`] and hands it to the
//! [`ToolServer`]. Discovery and tool routing are decided by the server's
//! dispatcher, not by the axum route table.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::ToolServer;
use crate::core::dispatch::{DISCOVERY_PATH, RequestBody, ToolRequest, ToolResponse};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport until Ctrl-C is received.
    pub async fn run(self, server: ToolServer) -> TransportResult<()> {
        let addr = self.config.address();
        let mode = server.dispatcher().mode();
        let app = build_router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} ({} dispatch, CORS {})",
            addr, mode, cors_status
        );
        info!("  → Discovery: GET|POST {}", DISCOVERY_PATH);
        info!("  → Ready:     GET /ready");
        info!("  → Health:    GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the axum router serving the tool server.
pub fn build_router(server: ToolServer, config: &HttpConfig) -> Router {
    let mut app = Router::new()
        .route("/ready", get(ready_check))
        .route("/health", get(health_check))
        .fallback(entry_point)
        .with_state(server)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Single entry point for discovery and tool calls.
async fn entry_point(
    State(server): State<ToolServer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ToolResponse {
    let request = ToolRequest::new(method, uri.path(), headers, RequestBody::from_bytes(&body));
    server.handle(request).await
}

/// Readiness endpoint.
async fn ready_check(State(server): State<ToolServer>) -> impl IntoResponse {
    let ready = server.is_ready().await;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(serde_json::json!({ "ready": ready })))
}

/// Health check endpoint.
async fn health_check(State(server): State<ToolServer>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "name": server.name(),
        "version": server.version(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
