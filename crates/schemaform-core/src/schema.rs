//! Schema-type resolution and enum extraction.
//!
//! Schema nodes are plain `serde_json::Value` trees — the schema grammar is
//! open-ended, so the engine keeps unrecognized keys intact and interprets
//! only the subset it understands. This module answers the two questions a
//! renderer asks of a node: "what kind of field is this?" and "what literal
//! values may it take?". Both work pre- and post-normalization, so the
//! dispatcher does not depend on the normalizer having run first.

use serde_json::Value;

/// Resolved kind of a schema node, used to pick a handling strategy.
///
/// A true multi-type union that survives null-filtering resolves to
/// `Unknown`: the only safe contract for such a node is "treat the value as
/// opaque JSON text".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Enum,
    Unknown,
}

impl SchemaType {
    /// Lowercase name, matching the wire spelling of the `type` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Number => "number",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::Enum => "enum",
            SchemaType::Unknown => "unknown",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "object" => SchemaType::Object,
            "array" => SchemaType::Array,
            _ => SchemaType::Unknown,
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the [`SchemaType`] of a node.
///
/// Enum detection runs first and also recognizes the all-constants
/// `anyOf`/`oneOf` pattern before normalization has collapsed it. Otherwise
/// the declared `type` is read with `"null"` entries filtered out; exactly
/// one surviving entry resolves to that type, anything else is `Unknown`.
pub fn schema_type(schema: &Value) -> SchemaType {
    if extract_enum_values(schema).is_some() {
        return SchemaType::Enum;
    }
    let types = non_null_types(schema);
    match types.as_slice() {
        [single] => SchemaType::from_name(single),
        _ => SchemaType::Unknown,
    }
}

/// Enumeration literals of a node: `enum` verbatim when present, else the
/// constants of an all-constant `anyOf`/`oneOf` (null variants discarded),
/// else `None`.
pub fn extract_enum_values(schema: &Value) -> Option<Vec<Value>> {
    if let Some(Value::Array(values)) = schema.get("enum") {
        return Some(values.clone());
    }

    let variants = union_variants(schema)?;
    let mut literals = Vec::with_capacity(variants.len());
    for variant in variants {
        if is_null_variant(variant) {
            continue;
        }
        match variant.get("const") {
            Some(constant) => literals.push(constant.clone()),
            None => return None,
        }
    }
    if literals.is_empty() {
        None
    } else {
        Some(literals)
    }
}

/// The node's `anyOf`/`oneOf` variant list, `anyOf` preferred when both are
/// present.
pub(crate) fn union_variants(schema: &Value) -> Option<&Vec<Value>> {
    for keyword in ["anyOf", "oneOf"] {
        if let Some(Value::Array(variants)) = schema.get(keyword) {
            return Some(variants);
        }
    }
    None
}

/// A variant that only admits null: `type: "null"` or `const: null`.
pub(crate) fn is_null_variant(variant: &Value) -> bool {
    if variant.get("type").and_then(Value::as_str) == Some("null") {
        return true;
    }
    matches!(variant.get("const"), Some(Value::Null))
}

/// Declared types with `"null"` entries filtered out. A scalar `type` yields
/// one entry; a missing or malformed `type` yields none.
pub(crate) fn non_null_types(schema: &Value) -> Vec<&str> {
    match schema.get("type") {
        Some(Value::String(name)) if name != "null" => vec![name.as_str()],
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| *name != "null")
            .collect(),
        _ => Vec::new(),
    }
}

/// Whether every entry names a primitive scalar type.
pub(crate) fn all_primitive(types: &[&str]) -> bool {
    !types.is_empty()
        && types
            .iter()
            .all(|name| matches!(*name, "string" | "number" | "integer" | "boolean"))
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_schema_type_scalar() {
        assert_eq!(schema_type(&json!({ "type": "string" })), SchemaType::String);
        assert_eq!(schema_type(&json!({ "type": "integer" })), SchemaType::Integer);
        assert_eq!(schema_type(&json!({ "type": "array" })), SchemaType::Array);
    }

    #[test]
    fn test_schema_type_nullable_array_collapses() {
        let schema = json!({ "type": ["string", "null"] });
        assert_eq!(schema_type(&schema), SchemaType::String);
    }

    #[test]
    fn test_schema_type_true_union_is_unknown() {
        let schema = json!({ "type": ["string", "integer"] });
        assert_eq!(schema_type(&schema), SchemaType::Unknown);
    }

    #[test]
    fn test_schema_type_enum_keyword() {
        let schema = json!({ "type": "string", "enum": ["a", "b"] });
        assert_eq!(schema_type(&schema), SchemaType::Enum);
    }

    #[test]
    fn test_schema_type_const_union_pre_normalization() {
        let schema = json!({ "anyOf": [{ "const": "a" }, { "const": "b" }] });
        assert_eq!(schema_type(&schema), SchemaType::Enum);
    }

    #[test]
    fn test_schema_type_missing_type_is_unknown() {
        assert_eq!(schema_type(&json!({})), SchemaType::Unknown);
        assert_eq!(schema_type(&json!({ "type": "null" })), SchemaType::Unknown);
    }

    #[test]
    fn test_extract_enum_values_verbatim() {
        let schema = json!({ "enum": ["x", 3, false] });
        assert_eq!(extract_enum_values(&schema), Some(vec![json!("x"), json!(3), json!(false)]));
    }

    #[test]
    fn test_extract_enum_values_from_const_union() {
        let schema = json!({ "anyOf": [{ "const": "a" }, { "const": "b" }] });
        assert_eq!(extract_enum_values(&schema), Some(vec![json!("a"), json!("b")]));
    }

    #[test]
    fn test_extract_enum_values_ignores_null_variants() {
        let schema = json!({
            "oneOf": [{ "const": "on" }, { "type": "null" }, { "const": "off" }]
        });
        assert_eq!(extract_enum_values(&schema), Some(vec![json!("on"), json!("off")]));
    }

    #[test]
    fn test_extract_enum_values_mixed_union_is_none() {
        let schema = json!({ "anyOf": [{ "const": "a" }, { "type": "string" }] });
        assert_eq!(extract_enum_values(&schema), None);
    }

    #[test]
    fn test_extract_enum_values_absent() {
        assert_eq!(extract_enum_values(&json!({ "type": "string" })), None);
    }
}
