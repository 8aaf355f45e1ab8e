//! The catalog service wraps every JSON body as `{message, data}`.
//!
//! Some endpoints wrap twice (`{message, data: {message, data}}`) and signal
//! business failures by setting the inner `message` to `"error"` with a
//! human-readable string in `data`. Both depths are accepted here.

use serde_json::{Map, Value};

use super::ApiError;

/// `message` value the service uses to flag a failed operation
const ERROR_MARKER: &str = "error";

const FALLBACK_ERROR: &str = "Request failed";

/// Unwrap a successful (2xx) response body down to its payload.
///
/// Bodies without a `data` key are returned untouched.
pub fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    let mut outer = match body {
        Value::Object(map) if map.contains_key("data") => map,
        other => return Ok(other),
    };

    if is_error(&outer) {
        return Err(ApiError::Business(describe(outer.remove("data"))));
    }

    match outer.remove("data").unwrap_or(Value::Null) {
        Value::Object(mut inner) if is_envelope(&inner) => {
            if is_error(&inner) {
                Err(ApiError::Business(describe(inner.remove("data"))))
            } else {
                Ok(inner.remove("data").unwrap_or(Value::Null))
            }
        }
        payload => Ok(payload),
    }
}

/// Best-effort message from a failed response body.
///
/// Returns `None` when the body carries nothing readable so the caller can
/// fall back to the transport-level status text.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let map = value.as_object()?;

    if is_error(map) {
        if let Some(Value::String(text)) = map.get("data") {
            if !text.trim().is_empty() {
                return Some(text.clone());
            }
        }
    }

    if let Some(Value::Object(inner)) = map.get("data") {
        if is_envelope(inner) && is_error(inner) {
            return Some(describe(inner.get("data").cloned()));
        }
    }

    map.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty() && *m != ERROR_MARKER)
        .map(str::to_string)
}

fn is_envelope(map: &Map<String, Value>) -> bool {
    map.contains_key("message") && map.contains_key("data")
}

fn is_error(map: &Map<String, Value>) -> bool {
    map.get("message").and_then(Value::as_str) == Some(ERROR_MARKER)
}

fn describe(data: Option<Value>) -> String {
    match data {
        Some(Value::String(text)) if !text.trim().is_empty() => text,
        None | Some(Value::Null) | Some(Value::String(_)) => FALLBACK_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}
