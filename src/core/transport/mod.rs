//! Transport layer for the tool server.
//!
//! The platform reaches tools over HTTP. The transport owns the listener and
//! the axum router, and hands every tool request to the
//! [`ToolServer`](crate::core::ToolServer).

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{HttpTransport, build_router};
