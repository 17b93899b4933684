//! Parameter extraction and schema validation.
//!
//! The platform sends tool arguments wrapped as `{"parameters": {...}}`. For
//! direct testing a flat object whose top-level fields are the parameters is
//! accepted as well.

use serde_json::Value;
use tracing::{info, warn};

use super::descriptor::ParameterSpec;
use super::error::FieldViolation;

/// Key under which the platform wraps tool arguments.
pub const PARAMETERS_KEY: &str = "parameters";

/// JavaScript-style truthiness, which decides whether the wrapper key counts.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Produce the parameter object handed to a tool handler.
///
/// Returns `body.parameters` when it is present and truthy, otherwise the
/// body itself unmodified. An absent body yields `Value::Null`.
pub fn extract_parameters(body: Option<&Value>) -> Value {
    let Some(body) = body else {
        warn!("Request has no JSON body. Using null parameters.");
        return Value::Null;
    };

    match body.get(PARAMETERS_KEY) {
        Some(parameters) if is_truthy(parameters) => {
            info!(%parameters, "Extracted parameters from 'parameters' key");
            parameters.clone()
        }
        _ => {
            warn!("'parameters' key not found in request body. Using body directly.");
            body.clone()
        }
    }
}

/// Check extracted parameters against a tool's parameter schema.
///
/// `null` is treated as an empty parameter object. Fields not named in the
/// schema are ignored. A present field whose value is `null` counts as absent.
pub fn validate_parameters(
    parameters: &Value,
    specs: &[ParameterSpec],
) -> Result<(), Vec<FieldViolation>> {
    let empty = serde_json::Map::new();
    let fields = match parameters {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => {
            return Err(vec![FieldViolation::new(
                PARAMETERS_KEY,
                "must be a JSON object",
            )]);
        }
    };

    let violations: Vec<FieldViolation> = specs
        .iter()
        .filter_map(|spec| match fields.get(&spec.name) {
            None | Some(Value::Null) if spec.required => Some(FieldViolation::new(
                &spec.name,
                format!("'{}' is required", spec.name),
            )),
            None | Some(Value::Null) => None,
            Some(value) if !spec.param_type.matches(value) => Some(FieldViolation::new(
                &spec.name,
                format!("'{}' must be of type {}", spec.name, spec.param_type),
            )),
            Some(_) => None,
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
