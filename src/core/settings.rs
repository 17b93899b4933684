//! Settings and secrets lookup.
//!
//! Handlers and the authorization hook read deployment settings through the
//! [`SettingsStore`] trait. The bundled store is populated from configuration
//! at startup and is read-only afterwards.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::config::Config;
use super::error::Result;

/// Settings key holding the bearer token expected from the platform.
pub const BEARER_TOKEN_KEY: &str = "bearer_token";

/// Key/value settings lookup.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch a setting. Returns `Ok(None)` when the key is not set.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
}

/// Settings held in memory.
#[derive(Default, Clone)]
pub struct InMemorySettingsStore {
    values: HashMap<String, Value>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a setting.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Build the store from the server configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut store = Self::new();
        if let Some(token) = &config.auth.bearer_token {
            store = store.with(BEARER_TOKEN_KEY, token.clone());
        }
        store
    }
}

impl std::fmt::Debug for InMemorySettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySettingsStore")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }
}
