//! Single-entry-point dispatcher with sequential path matching.
//!
//! Paths are compared to each registered endpoint in declaration order and
//! the first exact match wins. Parameters reach the handler unvalidated, so a
//! missing field surfaces as a handler failure.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use tracing::{error, info, warn};

use super::{DISCOVERY_PATH, DispatchMode, Dispatcher, ToolRequest, ToolResponse};
use crate::domains::tools::{OptiIdAuthData, ToolRegistry, extract_parameters};

/// Body returned when no tool matches the request path.
pub const INVALID_PATH_MESSAGE: &str = "Invalid path";

/// Dispatcher that scans endpoints linearly.
pub struct ManualDispatcher {
    registry: Arc<ToolRegistry>,
}

impl ManualDispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Dispatcher for ManualDispatcher {
    fn mode(&self) -> DispatchMode {
        DispatchMode::Manual
    }

    fn routes_to_tool(&self, path: &str) -> bool {
        self.registry
            .tools()
            .iter()
            .any(|tool| tool.descriptor().endpoint == path)
    }

    async fn dispatch(&self, request: ToolRequest) -> ToolResponse {
        if request.path == DISCOVERY_PATH {
            return match serde_json::to_value(self.registry.discovery()) {
                Ok(payload) => ToolResponse::ok(payload),
                Err(e) => ToolResponse::text(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            };
        }

        for tool in self.registry.tools() {
            let descriptor = tool.descriptor();
            if request.path != descriptor.endpoint {
                continue;
            }

            info!(tool = %descriptor.name, "Dispatching tool call");
            let body = request.body.json();
            let parameters = extract_parameters(body);
            let auth = OptiIdAuthData::from_body(body);

            return match tool.call(parameters, auth).await {
                Ok(result) => ToolResponse::ok(result),
                Err(e) => {
                    error!(tool = %descriptor.name, "Tool handler failed: {}", e);
                    ToolResponse::text(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
                }
            };
        }

        warn!(path = %request.path, "No tool matches request path");
        ToolResponse::text(StatusCode::BAD_REQUEST, INVALID_PATH_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::{RequestBody, ResponseBody};
    use crate::domains::tools::definitions::FixedClock;
    use axum::http::{HeaderMap, Method};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn dispatcher() -> ManualDispatcher {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap());
        let registry = ToolRegistry::with_default_tools(Arc::new(clock)).unwrap();
        ManualDispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_discovery() {
        let response = dispatcher()
            .dispatch(ToolRequest::post(DISCOVERY_PATH, json!({})))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        let functions = &response.json_body().unwrap()["functions"];
        assert_eq!(functions.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_path_is_invalid() {
        let response = dispatcher()
            .dispatch(ToolRequest::post("/tools/unknown", json!({})))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, ResponseBody::Text("Invalid path".to_string()));
    }

    #[tokio::test]
    async fn test_trailing_slash_not_normalized() {
        let response = dispatcher()
            .dispatch(ToolRequest::post("/tools/greeting/", json!({ "name": "Bo" })))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrapped_parameters() {
        let response = dispatcher()
            .dispatch(ToolRequest::post(
                "/tools/todays-date",
                json!({ "parameters": { "format": "%d/%m/%Y" } }),
            ))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json_body().unwrap()["date"], "05/03/2024");
    }

    #[tokio::test]
    async fn test_flat_parameters_fallback() {
        let response = dispatcher()
            .dispatch(ToolRequest::post(
                "/tools/greeting",
                json!({ "name": "Ana", "language": "spanish" }),
            ))
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json_body().unwrap()["greeting"],
            "¡Hola, Ana! ¿Cómo estás?"
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_handler_failure() {
        let response = dispatcher()
            .dispatch(ToolRequest::post(
                "/tools/greeting",
                json!({ "parameters": { "language": "french" } }),
            ))
            .await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

        let absent = ToolRequest::new(
            Method::POST,
            "/tools/greeting",
            HeaderMap::new(),
            RequestBody::Empty,
        );
        let response = dispatcher().dispatch(absent).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_method_is_not_checked() {
        let request = ToolRequest::new(
            Method::GET,
            "/tools/todays-date",
            HeaderMap::new(),
            json!({}),
        );
        let response = dispatcher().dispatch(request).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    #[test]
    fn test_routes_to_tool() {
        let dispatcher = dispatcher();
        assert!(dispatcher.routes_to_tool("/tools/greeting"));
        assert!(!dispatcher.routes_to_tool("/tools/unknown"));
        assert_eq!(dispatcher.mode(), DispatchMode::Manual);
    }
}
