//! Shape checks on the status API response

use serde_json::Value;

use crate::error::{ReviewNotifierError, RESPONSE_CONTEXT};

pub const HOMEWORKS_KEY: &str = "homeworks";

/// Return the most recent homework record (index 0 of `homeworks`).
pub fn extract_first_homework(response: &Value) -> crate::Result<&Value> {
    let root = response.as_object().ok_or_else(|| {
        ReviewNotifierError::ResponseType(format!(
            "expected a JSON object at the root, got {}",
            type_name(response)
        ))
    })?;

    let homeworks = root
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| ReviewNotifierError::missing_key(HOMEWORKS_KEY, RESPONSE_CONTEXT))?;

    let homeworks = homeworks.as_array().ok_or_else(|| {
        ReviewNotifierError::ResponseType(format!(
            "expected '{}' to be a list, got {}",
            HOMEWORKS_KEY,
            type_name(homeworks)
        ))
    })?;

    homeworks.first().ok_or(ReviewNotifierError::EmptyHomeworks)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
