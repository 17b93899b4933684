//! Bearer token authentication for tool requests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use tracing::{error, warn};

use super::{AuthDecision, Authorizer};
use crate::core::dispatch::ToolRequest;
use crate::core::settings::{BEARER_TOKEN_KEY, SettingsStore};

/// Message returned to callers that fail the bearer token check.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or missing bearer token";

/// Validates the `Authorization: Bearer <token>` header against `expected`.
pub fn validate_bearer(headers: &HeaderMap, expected: &str) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|provided| provided == expected)
}

/// Requires the bearer token stored under `bearer_token` in the settings.
///
/// The token is read on every request. When no token is configured (or it is
/// empty) all requests are allowed.
pub struct BearerTokenAuthorizer {
    settings: Arc<dyn SettingsStore>,
}

impl BearerTokenAuthorizer {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    async fn expected_token(&self) -> Option<String> {
        match self.settings.get(BEARER_TOKEN_KEY).await {
            Ok(value) => value
                .and_then(|v| v.as_str().map(str::to_string))
                .filter(|token| !token.is_empty()),
            Err(e) => {
                error!("Failed to read bearer token setting: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl Authorizer for BearerTokenAuthorizer {
    async fn authorize(&self, request: &ToolRequest) -> AuthDecision {
        let Some(expected) = self.expected_token().await else {
            return AuthDecision::Allow;
        };

        if validate_bearer(&request.headers, &expected) {
            AuthDecision::Allow
        } else {
            warn!(
                method = %request.method,
                path = %request.path,
                "Invalid or missing bearer token"
            );
            AuthDecision::Deny(INVALID_TOKEN_MESSAGE.to_string())
        }
    }
}
