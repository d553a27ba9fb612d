//! Schema normalization.
//!
//! Collapses a raw schema node into the canonical shape the rest of the
//! engine relies on. Applied recursively, depth-first, always returning a
//! new node — the input is never mutated. The pass performs:
//!
//! 1. Union-with-null collapse: `type: ["string", "null"]` → `type: "string"`
//! 2. `anyOf`/`oneOf` resolution: all-constant unions become enumerations,
//!    single-variant unions are unwrapped and merged, primitive multi-type
//!    unions are left bare, everything else is recorded as unsupported
//! 3. Recursion into `properties`, `items` (single node or positional
//!    tuple), and object-form `additionalProperties` templates
//!
//! ## Failure policy
//!
//! A schema construct the pass cannot fully interpret is not an error: the
//! node's path is appended to `unsupported_paths` and a best-effort node is
//! still returned, so the caller can fall back to raw-text editing for that
//! subtree. The pass never fails on malformed schema input.

use serde_json::{Map, Value};

use crate::options::NormalizeOptions;
use crate::path::{path_key, Segment};
use crate::schema::{all_primitive, is_null_variant, non_null_types};

/// Result of running the normalization pass.
#[derive(Debug)]
pub struct NormalizeResult {
    /// The normalized schema.
    pub schema: Value,
    /// Dot-joined paths of nodes that could not be fully interpreted.
    pub unsupported_paths: Vec<String>,
}

/// Normalize a schema subtree rooted at `base_path`.
///
/// # Arguments
///
/// * `schema` - A raw schema node (any shape; non-objects pass through)
/// * `base_path` - Document path of the subtree, used to label unsupported
///   constructs
/// * `options` - Recursion guard settings
pub fn normalize(
    schema: &Value,
    base_path: &[Segment],
    options: &NormalizeOptions,
) -> NormalizeResult {
    let mut unsupported_paths = Vec::new();
    let mut path = base_path.to_vec();
    let schema = normalize_node(schema, &mut path, 0, options, &mut unsupported_paths);
    NormalizeResult {
        schema,
        unsupported_paths,
    }
}

fn normalize_node(
    node: &Value,
    path: &mut Vec<Segment>,
    depth: usize,
    options: &NormalizeOptions,
    unsupported: &mut Vec<String>,
) -> Value {
    let Some(source) = node.as_object() else {
        return node.clone();
    };

    if depth > options.max_depth {
        tracing::warn!(
            path = %path_key(path),
            max_depth = options.max_depth,
            "max depth exceeded; subtree left unnormalized"
        );
        unsupported.push(path_key(path));
        return node.clone();
    }

    let mut obj = source.clone();

    // --- Step 1: union-with-null collapse ---
    collapse_nullable_type(&mut obj);

    // --- Step 2: anyOf/oneOf resolution ---
    if let UnionOutcome::Unwrap(variant) = resolve_union(&mut obj, path, unsupported) {
        // Single non-constant variant: merge it over the current node and
        // normalize the merged result as one node, so chained wrappers
        // unwrap all the way down.
        if let Value::Object(fields) = variant {
            for (key, value) in fields {
                obj.insert(key, value);
            }
        }
        return normalize_node(&Value::Object(obj), path, depth + 1, options, unsupported);
    }

    // --- Step 3: recurse into schema-bearing children ---

    if let Some(properties) = obj.remove("properties") {
        match properties {
            Value::Object(properties) => {
                let mut normalized = Map::new();
                for (key, child) in properties {
                    path.push(Segment::Key(key.clone()));
                    let value = normalize_node(&child, path, depth + 1, options, unsupported);
                    path.pop();
                    normalized.insert(key, value);
                }
                obj.insert("properties".to_string(), Value::Object(normalized));
            }
            // Not a map of schemas — preserve as-is.
            other => {
                obj.insert("properties".to_string(), other);
            }
        }
    }

    if let Some(items) = obj.remove("items") {
        let normalized = match items {
            Value::Object(_) => normalize_node(&items, path, depth + 1, options, unsupported),
            Value::Array(positions) => {
                // Positional tuple: one recursive call per position.
                let mut normalized = Vec::with_capacity(positions.len());
                for (index, child) in positions.iter().enumerate() {
                    path.push(Segment::Index(index));
                    normalized.push(normalize_node(child, path, depth + 1, options, unsupported));
                    path.pop();
                }
                Value::Array(normalized)
            }
            other => other,
        };
        obj.insert("items".to_string(), normalized);
    }

    if let Some(template) = obj.remove("additionalProperties") {
        // Object templates describe free-form map entries; the boolean form
        // passes through untouched.
        let normalized = if template.is_object() {
            path.push(Segment::Key("*".to_string()));
            let value = normalize_node(&template, path, depth + 1, options, unsupported);
            path.pop();
            value
        } else {
            template
        };
        obj.insert("additionalProperties".to_string(), normalized);
    }

    Value::Object(obj)
}

// ---------------------------------------------------------------------------
// Step 1: union-with-null collapse
// ---------------------------------------------------------------------------

/// Strip `"null"` entries from an array-form `type`. One survivor becomes a
/// scalar type; several survivors stay as a (nullable-stripped) array; none
/// removes the keyword altogether.
fn collapse_nullable_type(obj: &mut Map<String, Value>) {
    let Some(Value::Array(entries)) = obj.get("type") else {
        return;
    };

    let remaining: Vec<Value> = entries
        .iter()
        .filter(|entry| entry.as_str() != Some("null"))
        .cloned()
        .collect();

    match remaining.len() {
        0 => {
            obj.remove("type");
        }
        1 => {
            obj.insert("type".to_string(), remaining.into_iter().next().unwrap_or(Value::Null));
        }
        _ => {
            obj.insert("type".to_string(), Value::Array(remaining));
        }
    }
}

// ---------------------------------------------------------------------------
// Step 2: anyOf/oneOf resolution
// ---------------------------------------------------------------------------

enum UnionOutcome {
    /// Resolution finished in place (or there was nothing to resolve).
    Done,
    /// Exactly one non-constant variant remained; the caller merges it over
    /// the current node and re-normalizes.
    Unwrap(Value),
}

fn resolve_union(
    obj: &mut Map<String, Value>,
    path: &mut Vec<Segment>,
    unsupported: &mut Vec<String>,
) -> UnionOutcome {
    let Some(keyword) = ["anyOf", "oneOf"]
        .into_iter()
        .find(|keyword| obj.contains_key(*keyword))
    else {
        return UnionOutcome::Done;
    };

    let variants = match obj.remove(keyword) {
        Some(Value::Array(variants)) => variants,
        Some(other) => {
            // Non-array union keyword is uninterpretable — preserve as-is.
            unsupported.push(path_key(path));
            obj.insert(keyword.to_string(), other);
            return UnionOutcome::Done;
        }
        None => return UnionOutcome::Done,
    };

    // Discard variants that only admit null — they signal optional-ness, not
    // a renderable alternative.
    let retained: Vec<Value> = variants
        .into_iter()
        .filter(|variant| !is_null_variant(variant))
        .collect();

    if retained.is_empty() {
        tracing::debug!(path = %path_key(path), "union held only null variants; dropped");
        return UnionOutcome::Done;
    }

    // All-constant union → plain enumeration.
    if retained
        .iter()
        .all(|variant| variant.get("const").is_some())
    {
        let literals: Vec<Value> = retained
            .iter()
            .filter_map(|variant| variant.get("const").cloned())
            .collect();
        obj.insert("type".to_string(), Value::String("string".to_string()));
        obj.insert("enum".to_string(), Value::Array(literals));
        return UnionOutcome::Done;
    }

    // Single non-constant variant → nullable-reference unwrap.
    if retained.len() == 1 {
        let variant = retained.into_iter().next().unwrap_or(Value::Null);
        return UnionOutcome::Unwrap(variant);
    }

    // Several non-constant variants: tolerable as a bare union only when
    // every variant is a primitive scalar.
    let primitive_only = retained.iter().all(|variant| {
        let types = non_null_types(variant);
        types.len() == 1 && all_primitive(&types)
    });
    if !primitive_only {
        tracing::debug!(path = %path_key(path), "union variants not interpretable; flagged");
        unsupported.push(path_key(path));
    }
    obj.insert(keyword.to_string(), Value::Array(retained));
    UnionOutcome::Done
}

// ===========================================================================
// Tests
// ===========================================================================
