//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the tool server:
//! error handling, configuration, settings lookup, authorization, request
//! dispatch, server lifecycle management and the HTTP transport.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod security;
pub mod server;
pub mod settings;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::ToolServer;
pub use transport::{HttpConfig, HttpTransport};
