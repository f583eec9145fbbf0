//! Response shaping for the tool surface.
//!
//! Every operation returns a JSON object with a `success` key. On success
//! the remaining keys are operation-specific (flattened from the payload);
//! on failure they are exactly `error` (one of the six taxonomy kinds) and
//! `message` (human-readable). Nothing above this module ever constructs a
//! JSON response by hand — [`ok`] and [`err`] are the only two shapes.

use migration_core::domain::ToolError;
use serde::Serialize;
use serde_json::{json, Value};

/// Wraps a successful payload with `"success": true`, flattening the
/// payload's own fields into the top-level object.
///
/// # Panics
/// Never: `serde_json::to_value` only fails for types with non-string map
/// keys or that contain a `NaN`/`Infinity` float, neither of which this
/// crate's response payloads produce.
pub fn ok<T: Serialize>(payload: T) -> Value {
    let mut value = serde_json::to_value(payload).unwrap_or(Value::Null);
    match value {
        Value::Object(ref mut map) => {
            map.insert("success".to_string(), Value::Bool(true));
        }
        Value::Null => {
            value = json!({ "success": true });
        }
        other => {
            value = json!({ "success": true, "result": other });
        }
    }
    value
}

/// Builds the `{success: false, error, message}` record from a
/// [`ToolError`].
pub fn err(error: &ToolError) -> Value {
    json!({
        "success": false,
        "error": error.kind(),
        "message": error.to_string(),
    })
}
