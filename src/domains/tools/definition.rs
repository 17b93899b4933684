//! Declarative tool definitions.
//!
//! A tool declares its metadata as associated constants next to its handler,
//! so discovery output and routing are both derived from the same source.
//! The registry stores tools behind the object-safe [`ToolHandler`] trait.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::auth_data::OptiIdAuthData;
use super::descriptor::{ParameterSpec, ToolDescriptor};
use super::error::ToolError;

/// Static declaration of a tool and its handler.
#[async_trait]
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as published in discovery. Must be unique.
    const NAME: &'static str;

    /// Tool description shown to the platform.
    const DESCRIPTION: &'static str;

    /// Path at which the tool is invoked.
    const ENDPOINT: &'static str;

    /// HTTP method the tool answers to.
    const HTTP_METHOD: &'static str = "POST";

    /// Typed parameters decoded from the extracted parameter object.
    type Params: DeserializeOwned + Send;

    /// Result returned to the caller as JSON.
    type Output: Serialize + Send;

    /// Parameter schema published in discovery and enforced by the
    /// declarative dispatcher.
    fn parameters() -> Vec<ParameterSpec>;

    /// Run the tool.
    async fn execute(
        &self,
        params: Self::Params,
        auth: Option<OptiIdAuthData>,
    ) -> Result<Self::Output, ToolError>;

    /// Build the discovery descriptor from the declaration.
    fn descriptor() -> ToolDescriptor
    where
        Self: Sized,
    {
        ToolDescriptor {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            parameters: Self::parameters(),
            endpoint: Self::ENDPOINT.to_string(),
            http_method: Self::HTTP_METHOD.to_string(),
        }
    }
}

/// Type-erased tool as stored by the registry.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Metadata of the tool.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Decode the parameters, run the tool and encode its output.
    async fn call(
        &self,
        parameters: Value,
        auth: Option<OptiIdAuthData>,
    ) -> Result<Value, ToolError>;
}

/// A [`ToolDefinition`] paired with its descriptor, computed once.
pub struct DefinedTool<T: ToolDefinition> {
    tool: T,
    descriptor: ToolDescriptor,
}

impl<T: ToolDefinition> DefinedTool<T> {
    pub fn new(tool: T) -> Self {
        Self {
            tool,
            descriptor: T::descriptor(),
        }
    }
}

#[async_trait]
impl<T: ToolDefinition> ToolHandler for DefinedTool<T> {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn call(
        &self,
        parameters: Value,
        auth: Option<OptiIdAuthData>,
    ) -> Result<Value, ToolError> {
        let params: T::Params = serde_json::from_value(parameters)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let output = self.tool.execute(params, auth).await?;

        serde_json::to_value(output).map_err(|e| ToolError::internal(e.to_string()))
    }
}
