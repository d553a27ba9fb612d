//! Semantic diff between two document snapshots.
//!
//! Changes are reported at leaf granularity: as long as both sides of a key
//! are plain objects the walk recurses, so a one-field edit deep inside a
//! nested section yields exactly one record rather than a whole-object
//! replacement. Arrays and scalars are compared wholesale.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::{path_key, Segment};

/// One leaf-level difference between two snapshots. An absent `from` marks
/// an added key, an absent `to` a removed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
}

/// Compare two document snapshots and collect the changed leaves.
///
/// `compute_changes(x, x)` is empty for any `x`, including deep clones.
/// Output order follows the union-of-keys iteration order (original keys
/// first, then keys only present in `current`) and is not contractually
/// sorted — callers needing stable display order sort by `path` themselves.
pub fn compute_changes(original: &Value, current: &Value) -> Vec<ChangeRecord> {
    let mut changes = Vec::new();
    let mut prefix = Vec::new();
    diff_value(original, current, &mut prefix, &mut changes);
    changes
}

fn diff_value(
    original: &Value,
    current: &Value,
    prefix: &mut Vec<Segment>,
    changes: &mut Vec<ChangeRecord>,
) {
    if original == current {
        return;
    }

    if let (Value::Object(before), Value::Object(after)) = (original, current) {
        for (key, before_value) in before {
            prefix.push(Segment::Key(key.clone()));
            match after.get(key) {
                Some(after_value) => diff_value(before_value, after_value, prefix, changes),
                None => changes.push(ChangeRecord {
                    path: path_key(prefix),
                    from: Some(before_value.clone()),
                    to: None,
                }),
            }
            prefix.pop();
        }
        for (key, after_value) in after {
            if before.contains_key(key) {
                continue;
            }
            prefix.push(Segment::Key(key.clone()));
            changes.push(ChangeRecord {
                path: path_key(prefix),
                from: None,
                to: Some(after_value.clone()),
            });
            prefix.pop();
        }
        return;
    }

    // Scalar, array, or object/non-object mismatch: one leaf record.
    changes.push(ChangeRecord {
        path: path_key(prefix),
        from: Some(original.clone()),
        to: Some(current.clone()),
    });
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paths(changes: &[ChangeRecord]) -> Vec<&str> {
        changes.iter().map(|c| c.path.as_str()).collect()
    }

    #[test]
    fn test_identical_documents_yield_nothing() {
        let doc = json!({ "a": 1, "b": { "c": [1, 2, 3] } });
        assert_eq!(compute_changes(&doc, &doc), vec![]);
        // Deep clone, different allocation.
        assert_eq!(compute_changes(&doc, &doc.clone()), vec![]);
    }

    #[test]
    fn test_scalar_edit_and_addition() {
        let original = json!({ "a": 1, "b": 2 });
        let current = json!({ "a": 1, "b": 3, "c": 4 });
        let mut changes = compute_changes(&original, &current);
        changes.sort_by(|x, y| x.path.cmp(&y.path));

        assert_eq!(
            changes,
            vec![
                ChangeRecord {
                    path: "b".into(),
                    from: Some(json!(2)),
                    to: Some(json!(3)),
                },
                ChangeRecord {
                    path: "c".into(),
                    from: None,
                    to: Some(json!(4)),
                },
            ]
        );
    }

    #[test]
    fn test_removed_key() {
        let original = json!({ "keep": true, "drop": "gone" });
        let current = json!({ "keep": true });
        let changes = compute_changes(&original, &current);
        assert_eq!(
            changes,
            vec![ChangeRecord {
                path: "drop".into(),
                from: Some(json!("gone")),
                to: None,
            }]
        );
    }

    #[test]
    fn test_nested_edit_reported_at_leaf() {
        let original = json!({ "gateway": { "net": { "port": 80, "host": "a" } } });
        let current = json!({ "gateway": { "net": { "port": 443, "host": "a" } } });
        let changes = compute_changes(&original, &current);
        assert_eq!(paths(&changes), vec!["gateway.net.port"]);
        assert_eq!(changes[0].from, Some(json!(80)));
        assert_eq!(changes[0].to, Some(json!(443)));
    }

    #[test]
    fn test_array_compared_wholesale() {
        let original = json!({ "tags": ["a", "b"] });
        let current = json!({ "tags": ["a", "c"] });
        let changes = compute_changes(&original, &current);
        assert_eq!(paths(&changes), vec!["tags"]);
        assert_eq!(changes[0].from, Some(json!(["a", "b"])));
        assert_eq!(changes[0].to, Some(json!(["a", "c"])));
    }

    #[test]
    fn test_object_to_scalar_mismatch_is_one_record() {
        let original = json!({ "x": { "a": 1 } });
        let current = json!({ "x": 5 });
        let changes = compute_changes(&original, &current);
        assert_eq!(
            changes,
            vec![ChangeRecord {
                path: "x".into(),
                from: Some(json!({ "a": 1 })),
                to: Some(json!(5)),
            }]
        );
    }

    #[test]
    fn test_root_scalar_difference() {
        let changes = compute_changes(&json!(1), &json!(2));
        assert_eq!(
            changes,
            vec![ChangeRecord {
                path: "".into(),
                from: Some(json!(1)),
                to: Some(json!(2)),
            }]
        );
    }

    #[test]
    fn test_serialized_absent_sides() {
        let record = ChangeRecord {
            path: "c".into(),
            from: None,
            to: Some(json!(4)),
        };
        let rendered = serde_json::to_value(&record).unwrap();
        // Absent sides stay absent on the wire rather than serializing null.
        assert_eq!(rendered, json!({ "path": "c", "to": 4 }));
    }
}
