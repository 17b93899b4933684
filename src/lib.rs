//! Opal Tools Server Library
//!
//! This crate exposes callable tool functions to the Opal orchestration
//! platform over HTTP. The platform fetches `/discovery` to learn which tools
//! exist and calls each tool with a POST to its endpoint.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, authorization, request dispatch
//!   and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Tool metadata, parameter handling and the bundled tools
//!
//! # Example
//!
//! ```rust,no_run
//! use opal_tools_server::core::{Config, HttpTransport, ToolServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = ToolServer::new(config.clone())?;
//!     HttpTransport::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, Result, ToolServer};
