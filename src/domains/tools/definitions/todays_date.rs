//! Today's date tool definition.
//!
//! Returns the current date in one of a small set of strftime-style formats.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::domains::tools::params::is_truthy;
use crate::domains::tools::{
    OptiIdAuthData, ParameterSpec, ParameterType, ToolDefinition, ToolError,
};

/// Format used when none (or an unknown one) is requested.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the today's date tool.
///
/// `format` is kept as raw JSON: without schema validation a caller may send
/// a non-string, which is echoed back and rendered as ISO.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodaysDateParams {
    /// Date format token (defaults to ISO format).
    #[serde(default)]
    pub format: Option<Value>,
}

/// Today's date tool output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodaysDateOutput {
    pub date: String,
    pub format: Value,
    /// Unix time in seconds, with millisecond precision.
    pub timestamp: f64,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Today's date tool.
pub struct TodaysDateTool {
    clock: Arc<dyn Clock>,
}

impl TodaysDateTool {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Render `now` for a supported format token; anything else renders as ISO.
    pub fn format_date(now: &DateTime<Utc>, format: &str) -> String {
        let pattern = match format {
            "%B %d, %Y" => "%B %-d, %Y",
            "%d/%m/%Y" => "%d/%m/%Y",
            ISO_FORMAT => ISO_FORMAT,
            other => {
                debug!("Unsupported date format '{}', using ISO", other);
                ISO_FORMAT
            }
        };
        now.format(pattern).to_string()
    }
}

#[async_trait]
impl ToolDefinition for TodaysDateTool {
    const NAME: &'static str = "todays-date";
    const DESCRIPTION: &'static str = "Returns today's date in the specified format";
    const ENDPOINT: &'static str = "/tools/todays-date";

    type Params = TodaysDateParams;
    type Output = TodaysDateOutput;

    fn parameters() -> Vec<ParameterSpec> {
        vec![ParameterSpec::optional(
            "format",
            ParameterType::String,
            "Date format (defaults to ISO format)",
        )]
    }

    async fn execute(
        &self,
        params: TodaysDateParams,
        _auth: Option<OptiIdAuthData>,
    ) -> Result<TodaysDateOutput, ToolError> {
        info!("Today's date tool called with parameters: {:?}", params);

        let format = params
            .format
            .filter(is_truthy)
            .unwrap_or_else(|| Value::from(ISO_FORMAT));
        let now = self.clock.now();

        Ok(TodaysDateOutput {
            date: Self::format_date(&now, format.as_str().unwrap_or(ISO_FORMAT)),
            format,
            timestamp: now.timestamp_millis() as f64 / 1000.0,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
