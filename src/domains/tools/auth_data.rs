//! Caller identity optionally forwarded by the platform.
//!
//! When a tool is invoked on behalf of an authenticated Opal user, the request
//! body carries an `auth` object next to `parameters`:
//!
//! ```json
//! {
//!   "parameters": { "name": "Ana" },
//!   "auth": {
//!     "provider": "OptiID",
//!     "credentials": { "customer_id": "...", "instance_id": "...", "access_token": "..." }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Key under which the platform forwards caller identity.
pub const AUTH_KEY: &str = "auth";

/// Credentials of the calling Opal user.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct OptiIdCredentials {
    pub customer_id: String,
    pub instance_id: String,
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_sku: Option<String>,
}

impl std::fmt::Debug for OptiIdCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptiIdCredentials")
            .field("customer_id", &self.customer_id)
            .field("instance_id", &self.instance_id)
            .field("access_token", &"[REDACTED]")
            .field("product_sku", &self.product_sku)
            .finish()
    }
}

/// Authenticated identity payload passed to handlers alongside parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptiIdAuthData {
    pub provider: String,
    pub credentials: OptiIdCredentials,
}

impl OptiIdAuthData {
    /// Read the `auth` object from a request body, if one is present and well formed.
    pub fn from_body(body: Option<&Value>) -> Option<Self> {
        let auth = body?.get(AUTH_KEY)?;
        match serde_json::from_value(auth.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Ignoring malformed 'auth' payload: {}", e);
                None
            }
        }
    }
}
