//! Integration tests for the HTTP router (discovery, tool calls, probes).

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use opal_tools_server::core::dispatch::{DispatchMode, PROBLEM_JSON_CONTENT_TYPE};
use opal_tools_server::core::security::{AllowAll, Authorizer, BearerTokenAuthorizer};
use opal_tools_server::core::settings::{BEARER_TOKEN_KEY, InMemorySettingsStore};
use opal_tools_server::core::{Config, HttpConfig, ToolServer, transport::build_router};
use opal_tools_server::domains::tools::ToolRegistry;
use opal_tools_server::domains::tools::definitions::FixedClock;

fn make_app(mode: DispatchMode, authorizer: Arc<dyn Authorizer>) -> axum::Router {
    let mut config = Config::default();
    config.dispatch.mode = mode;

    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap());
    let registry = ToolRegistry::with_default_tools(Arc::new(clock)).expect("registry");
    let server = ToolServer::with_components(config, registry, authorizer).expect("server");

    build_router(server, &HttpConfig::default())
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("req")
}

async fn body_text(resp: axum::response::Response) -> String {
    let body = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .expect("body");
    String::from_utf8(body.to_vec()).expect("utf8")
}

async fn body_json(resp: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(resp).await).expect("json")
}

#[tokio::test]
async fn discovery_lists_tools_for_get_and_post() {
    for mode in [DispatchMode::Declarative, DispatchMode::Manual] {
        let app = make_app(mode, Arc::new(AllowAll));

        let req = Request::builder()
            .uri("/discovery")
            .body(Body::empty())
            .expect("req");
        let resp = app.clone().oneshot(req).await.expect("resp");
        assert_eq!(resp.status(), StatusCode::OK);
        let get_payload = body_json(resp).await;

        let resp = app.oneshot(post("/discovery", json!({}))).await.expect("resp");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, get_payload);

        let functions = get_payload["functions"].as_array().expect("functions");
        let endpoints: Vec<_> = functions
            .iter()
            .map(|f| f["endpoint"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(endpoints, vec!["/tools/greeting", "/tools/todays-date"]);
        assert_eq!(functions[0]["parameters"][0]["name"], "name");
        assert_eq!(functions[0]["parameters"][0]["required"], true);
    }
}

#[tokio::test]
async fn every_discovered_endpoint_is_callable() {
    for mode in [DispatchMode::Declarative, DispatchMode::Manual] {
        let app = make_app(mode, Arc::new(AllowAll));
        let resp = app
            .clone()
            .oneshot(post("/discovery", json!({})))
            .await
            .expect("resp");
        let payload = body_json(resp).await;

        for function in payload["functions"].as_array().expect("functions") {
            let endpoint = function["endpoint"].as_str().expect("endpoint");
            let resp = app
                .clone()
                .oneshot(post(endpoint, json!({ "parameters": { "name": "Bo" } })))
                .await
                .expect("resp");
            assert_eq!(resp.status(), StatusCode::OK, "{} in {} mode", endpoint, mode);
        }
    }
}

#[tokio::test]
async fn greeting_call_returns_result() {
    let app = make_app(DispatchMode::Declarative, Arc::new(AllowAll));
    let resp = app
        .oneshot(post(
            "/tools/greeting",
            json!({ "parameters": { "name": "Ana", "language": "Spanish" } }),
        ))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "greeting": "¡Hola, Ana! ¿Cómo estás?", "language": "Spanish" })
    );
}

#[tokio::test]
async fn todays_date_uses_clock() {
    let app = make_app(DispatchMode::Manual, Arc::new(AllowAll));
    let resp = app
        .oneshot(post("/tools/todays-date", json!({ "format": "%d/%m/%Y" })))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::OK);
    let result = body_json(resp).await;
    assert_eq!(result["date"], "05/03/2024");
    assert_eq!(result["format"], "%d/%m/%Y");
    assert_eq!(result["timestamp"], json!(1_709_640_000.0));
}

#[tokio::test]
async fn manual_unknown_path_is_invalid() {
    let app = make_app(DispatchMode::Manual, Arc::new(AllowAll));
    let resp = app
        .oneshot(post("/tools/unknown", json!({})))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Invalid path");
}

#[tokio::test]
async fn declarative_unknown_path_is_problem_details() {
    let app = make_app(DispatchMode::Declarative, Arc::new(AllowAll));
    let resp = app
        .oneshot(post("/tools/unknown", json!({})))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).expect("content type"),
        PROBLEM_JSON_CONTENT_TYPE
    );
    let problem = body_json(resp).await;
    assert_eq!(problem["status"], 404);
    assert_eq!(problem["instance"], "/tools/unknown");
}

#[tokio::test]
async fn declarative_validation_failure() {
    let app = make_app(DispatchMode::Declarative, Arc::new(AllowAll));
    let resp = app
        .oneshot(post("/tools/greeting", json!({ "parameters": { "name": 5 } })))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem = body_json(resp).await;
    assert_eq!(problem["errors"][0]["field"], "name");
}

#[tokio::test]
async fn manual_missing_field_is_server_error() {
    let app = make_app(DispatchMode::Manual, Arc::new(AllowAll));
    let resp = app
        .oneshot(post("/tools/greeting", json!({ "parameters": { "language": "french" } })))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn manual_empty_parameters_object_is_used_as_is() {
    let app = make_app(DispatchMode::Manual, Arc::new(AllowAll));

    // `{}` is truthy, so the sibling `format` key is ignored.
    let resp = app
        .clone()
        .oneshot(post(
            "/tools/todays-date",
            json!({ "parameters": {}, "format": "%d/%m/%Y" }),
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    let result = body_json(resp).await;
    assert_eq!(result["date"], "2024-03-05");
    assert_eq!(result["format"], "%Y-%m-%d");

    let resp = app
        .oneshot(post(
            "/tools/greeting",
            json!({ "parameters": {}, "name": "Bo" }),
        ))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(resp).await.contains("name"));
}

#[tokio::test]
async fn manual_non_string_format_is_echoed() {
    let app = make_app(DispatchMode::Manual, Arc::new(AllowAll));
    let resp = app
        .oneshot(post(
            "/tools/todays-date",
            json!({ "parameters": { "format": 7 } }),
        ))
        .await
        .expect("resp");

    assert_eq!(resp.status(), StatusCode::OK);
    let result = body_json(resp).await;
    assert_eq!(result["date"], "2024-03-05");
    assert_eq!(result["format"], 7);
}

#[tokio::test]
async fn bearer_token_required_when_configured() {
    let settings = InMemorySettingsStore::new().with(BEARER_TOKEN_KEY, "s3cret");
    let authorizer = Arc::new(BearerTokenAuthorizer::new(Arc::new(settings)));
    let app = make_app(DispatchMode::Declarative, authorizer);

    let resp = app
        .clone()
        .oneshot(post("/tools/greeting", json!({ "name": "Bo" })))
        .await
        .expect("resp");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_text(resp).await, "Invalid or missing bearer token");

    let req = Request::builder()
        .method("POST")
        .uri("/tools/greeting")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::from(json!({ "name": "Bo" }).to_string()))
        .expect("req");
    let resp = app.clone().oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);

    // Probes stay open.
    let req = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn ready_and_health_endpoints() {
    let app = make_app(DispatchMode::Declarative, Arc::new(AllowAll));

    let req = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .expect("req");
    let resp = app.clone().oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "ready": true }));

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("healthy"));
}

#[tokio::test]
async fn empty_registry_is_not_ready() {
    let server = ToolServer::with_components(Config::default(), ToolRegistry::new(), Arc::new(AllowAll))
        .expect("server");
    let app = build_router(server, &HttpConfig::default());

    let req = Request::builder()
        .uri("/ready")
        .body(Body::empty())
        .expect("req");
    let resp = app.oneshot(req).await.expect("resp");
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
