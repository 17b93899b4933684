//! Greeting tool definition.
//!
//! Greets a person in a caller-chosen or random language.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::tools::{
    OptiIdAuthData, ParameterSpec, ParameterType, ToolDefinition, ToolError,
};

/// Languages picked from when the caller does not choose one.
pub const LANGUAGES: [&str; 3] = ["english", "spanish", "french"];

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the greeting tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GreetingParams {
    /// Name of the person to greet.
    pub name: String,

    /// Language for the greeting (defaults to random).
    #[serde(default)]
    pub language: Option<String>,
}

/// Greeting tool output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreetingOutput {
    pub greeting: String,
    pub language: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Greeting tool - greets a person in English, Spanish or French.
#[derive(Debug, Clone, Default)]
pub struct GreetingTool;

impl GreetingTool {
    pub fn new() -> Self {
        Self
    }

    /// Build the greeting text. Unrecognized languages fall back to English.
    pub fn greet(name: &str, language: &str) -> String {
        match language.to_lowercase().as_str() {
            "spanish" => format!("¡Hola, {}! ¿Cómo estás?", name),
            "french" => format!("Bonjour, {}! Comment ça va?", name),
            _ => format!("Hello, {}! How are you?", name),
        }
    }

    fn random_language() -> &'static str {
        LANGUAGES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(LANGUAGES[0])
    }
}

#[async_trait]
impl ToolDefinition for GreetingTool {
    const NAME: &'static str = "greeting";
    const DESCRIPTION: &'static str =
        "Greets a person in a random language (English, Spanish, or French)";
    const ENDPOINT: &'static str = "/tools/greeting";

    type Params = GreetingParams;
    type Output = GreetingOutput;

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required(
                "name",
                ParameterType::String,
                "Name of the person to greet",
            ),
            ParameterSpec::optional(
                "language",
                ParameterType::String,
                "Language for greeting (defaults to random)",
            ),
        ]
    }

    async fn execute(
        &self,
        params: GreetingParams,
        _auth: Option<OptiIdAuthData>,
    ) -> Result<GreetingOutput, ToolError> {
        info!("Greeting tool called with parameters: {:?}", params);

        let language = match params.language {
            Some(language) if !language.is_empty() => language,
            _ => Self::random_language().to_string(),
        };

        Ok(GreetingOutput {
            greeting: Self::greet(&params.name, &language),
            language,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
