//! Free-text matching over a schema subtree.

use serde_json::Value;

use crate::hints::{hint_for_path, UiHintMap};
use crate::path::Segment;
use crate::schema::extract_enum_values;

/// Case-insensitive substring test of `term` against a schema node and its
/// descendants.
///
/// Tested in order: the key name, the resolved hint's label, the schema's
/// `title`, its `description`, and any `enum` literal. When none of those
/// match, the walk recurses into `properties`, so a section matches whenever
/// any field nested arbitrarily deep inside it matches. `path` is the full
/// path of the node (ending with `key`) and is used for hint resolution.
/// An empty or whitespace-only term matches everything.
pub fn matches_search(
    key: &str,
    schema: &Value,
    hints: &UiHintMap,
    path: &[Segment],
    term: &str,
) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let mut path = path.to_vec();
    matches_needle(key, schema, hints, &mut path, &needle)
}

fn matches_needle(
    key: &str,
    schema: &Value,
    hints: &UiHintMap,
    path: &mut Vec<Segment>,
    needle: &str,
) -> bool {
    if key.to_lowercase().contains(needle) {
        return true;
    }

    if let Some(label) = hint_for_path(path, hints).and_then(|hint| hint.label.as_deref()) {
        if label.to_lowercase().contains(needle) {
            return true;
        }
    }

    for field in ["title", "description"] {
        if let Some(text) = schema.get(field).and_then(Value::as_str) {
            if text.to_lowercase().contains(needle) {
                return true;
            }
        }
    }

    if let Some(literals) = extract_enum_values(schema) {
        for literal in &literals {
            if literal_text(literal).to_lowercase().contains(needle) {
                return true;
            }
        }
    }

    if let Some(Value::Object(properties)) = schema.get("properties") {
        for (child_key, child_schema) in properties {
            path.push(Segment::Key(child_key.clone()));
            let matched = matches_needle(child_key, child_schema, hints, path, needle);
            path.pop();
            if matched {
                return true;
            }
        }
    }

    false
}

/// Text form of an enumeration literal: strings match their content, other
/// literals their JSON rendering.
fn literal_text(literal: &Value) -> String {
    match literal {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
