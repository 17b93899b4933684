//! Tools domain module.
//!
//! This module handles everything a tool is made of: its discovery metadata,
//! its parameter contract and its handler.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `definition.rs` - The `ToolDefinition` trait tools implement
//! - `descriptor.rs` - Discovery metadata types
//! - `registry.rs` - Central tool registry, the source for discovery and routing
//! - `params.rs` - Parameter extraction and schema validation
//! - `auth_data.rs` - Caller identity forwarded by the platform
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Implement `ToolDefinition` for it
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `ToolRegistry::with_default_tools`
//!
//! Discovery and both dispatchers pick the tool up from the registry.

mod auth_data;
mod definition;
pub mod definitions;
mod descriptor;
mod error;
pub mod params;
mod registry;

pub use auth_data::{OptiIdAuthData, OptiIdCredentials};
pub use definition::{DefinedTool, ToolDefinition, ToolHandler};
pub use descriptor::{DiscoveryPayload, ParameterSpec, ParameterType, ToolDescriptor};
pub use error::{FieldViolation, ToolError};
pub use params::{extract_parameters, validate_parameters};
pub use registry::ToolRegistry;
pub(crate) use registry::canonical_method;
