//! Structural validation of the homework statuses API response.

use serde_json::Value;

use crate::error::{BotError, Result};

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validated view of an API response.
///
/// Homework records are left undecoded; each one is checked separately by
/// [`crate::homework::parse_status`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<'a> {
    pub homeworks: &'a [Value],
    pub current_date: &'a Value,
}

impl ApiResponse<'_> {
    /// Most recent homework record, if any.
    pub fn latest(&self) -> Option<&Value> {
        self.homeworks.first()
    }
}

/// Check that a decoded response has the documented shape.
///
/// The response must be an object holding both `homeworks` and
/// `current_date`, and `homeworks` must be an array.
pub fn check_response(response: &Value) -> Result<ApiResponse<'_>> {
    let object = response.as_object().ok_or_else(|| {
        BotError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_type(response)
        ))
    })?;

    let missing: Vec<&str> = [HOMEWORKS_KEY, CURRENT_DATE_KEY]
        .into_iter()
        .filter(|key| !object.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(BotError::missing(missing));
    }

    let homeworks = &object[HOMEWORKS_KEY];
    let homeworks = homeworks.as_array().ok_or_else(|| {
        BotError::MalformedResponse(format!(
            "`{HOMEWORKS_KEY}` must be a list, got {}",
            json_type(homeworks)
        ))
    })?;

    Ok(ApiResponse {
        homeworks,
        current_date: &object[CURRENT_DATE_KEY],
    })
}

/// Human-readable JSON type name for error messages.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
