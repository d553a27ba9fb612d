//! Type-appropriate empty values for schema nodes.

use serde_json::{json, Value};

use crate::schema::non_null_types;

/// Produce a structurally valid empty instance of a schema node's declared
/// type, used to seed new array items and free-form map entries.
///
/// An explicit `default` is returned verbatim. Otherwise the first declared
/// non-`"null"` type picks the value; anything unresolved falls back to the
/// empty string, matching the opaque-text rendering contract.
pub fn default_value(schema: &Value) -> Value {
    if let Some(default) = schema.get("default") {
        return default.clone();
    }

    match non_null_types(schema).first().copied() {
        Some("string") => json!(""),
        Some("number") | Some("integer") => json!(0),
        Some("boolean") => json!(false),
        Some("object") => json!({}),
        Some("array") => json!([]),
        _ => json!(""),
    }
}
