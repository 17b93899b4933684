//! Pre-invocation authorization.
//!
//! Every request routed to a dispatcher first passes through an
//! [`Authorizer`]. Deployments pick the implementation: [`AllowAll`] for open
//! endpoints, or [`BearerTokenAuthorizer`] to require the platform's bearer
//! token.

pub mod bearer;

use async_trait::async_trait;

use crate::core::dispatch::ToolRequest;

pub use bearer::{BearerTokenAuthorizer, validate_bearer};

/// Outcome of an authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow,
    Deny(String),
}

impl AuthDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides whether a request may reach a tool handler.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, request: &ToolRequest) -> AuthDecision;
}

/// Authorizer that lets every request through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn authorize(&self, _request: &ToolRequest) -> AuthDecision {
        AuthDecision::Allow
    }
}
