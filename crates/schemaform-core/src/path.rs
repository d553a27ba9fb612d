//! Structural addressing into configuration documents.
//!
//! A path is an ordered list of segments, each a map key or an array index,
//! locating one value inside an arbitrarily nested JSON document. The write
//! operations are immutable: they leave the input untouched and return a new
//! document, which is what keeps the load-time snapshot available for
//! diffing no matter how many edits pile up.
//!
//! The canonical comparison form of a path is its dot-joined rendering (see
//! [`path_key`]). That rendering is lossy — a map key that happens to be a
//! numeral is indistinguishable from an array index — so numeral-looking map
//! keys should not be used in hinted paths.

use std::fmt;

use serde_json::{Map, Value};

/// One step into a document: a map key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for Segment {
    fn from(key: &str) -> Self {
        Segment::Key(key.to_string())
    }
}

impl From<String> for Segment {
    fn from(key: String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

/// Dot-joined rendering of a path, indices in decimal.
///
/// Two paths are equal iff their renderings are equal; this string is the
/// comparison key used by hint lookup and by diff records.
pub fn path_key(path: &[Segment]) -> String {
    let mut rendered = String::new();
    for (position, segment) in path.iter().enumerate() {
        if position > 0 {
            rendered.push('.');
        }
        match segment {
            Segment::Key(key) => rendered.push_str(key),
            Segment::Index(index) => rendered.push_str(&index.to_string()),
        }
    }
    rendered
}

/// Parse a dot-joined path back into segments. All-digit segments become
/// indices — the inverse of [`path_key`] up to its documented aliasing.
pub fn parse_path(rendered: &str) -> Vec<Segment> {
    if rendered.is_empty() {
        return Vec::new();
    }
    rendered
        .split('.')
        .map(|segment| match segment.parse::<usize>() {
            Ok(index) => Segment::Index(index),
            Err(_) => Segment::Key(segment.to_string()),
        })
        .collect()
}

/// Read the value at `path`, or `None` when any segment fails to resolve.
pub fn get_path_value<'a>(doc: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in path {
        current = match (segment, current) {
            (Segment::Key(key), Value::Object(map)) => map.get(key)?,
            (Segment::Index(index), Value::Array(items)) => items.get(*index)?,
            // Numeric segment over a map: fall back to the string key, the
            // same coercion the dot-joined rendering implies.
            (Segment::Index(index), Value::Object(map)) => map.get(&index.to_string())?,
            _ => return None,
        };
    }
    Some(current)
}

/// Immutable deep set: returns a new document with `value` written at `path`.
///
/// An intermediate segment whose current value is not a container of the
/// right shape is silently replaced before descending — user edits must
/// never be lost to a rigid type check. An index one past the end of an
/// array appends; further past pads with nulls. The empty path is a no-op.
pub fn set_path_value(doc: &Value, path: &[Segment], value: Value) -> Value {
    if path.is_empty() {
        return doc.clone();
    }
    let mut next = doc.clone();
    set_in_place(&mut next, path, value);
    next
}

fn set_in_place(target: &mut Value, path: &[Segment], value: Value) {
    let Some((segment, rest)) = path.split_first() else {
        *target = value;
        return;
    };

    match segment {
        Segment::Key(key) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                set_in_place(slot, rest, value);
            }
        }
        Segment::Index(index) => {
            if let Value::Array(items) = target {
                while items.len() <= *index {
                    items.push(Value::Null);
                }
                set_in_place(&mut items[*index], rest, value);
            } else {
                // Index over a non-array: coerce to a map keyed by the
                // decimal rendering rather than dropping the edit.
                if !target.is_object() {
                    *target = Value::Object(Map::new());
                }
                if let Value::Object(map) = target {
                    let slot = map.entry(index.to_string()).or_insert(Value::Null);
                    set_in_place(slot, rest, value);
                }
            }
        }
    }
}

/// Immutable deep delete of the final segment from its parent container.
///
/// When any intermediate segment does not resolve, that branch is left
/// untouched and the document comes back unchanged (by value). Removing an
/// in-bounds array index renumbers the following elements. The empty path
/// is a no-op.
pub fn remove_path_value(doc: &Value, path: &[Segment]) -> Value {
    if path.is_empty() {
        return doc.clone();
    }
    let mut next = doc.clone();
    remove_in_place(&mut next, path);
    next
}

fn remove_in_place(target: &mut Value, path: &[Segment]) {
    let Some((segment, rest)) = path.split_first() else {
        return;
    };

    if rest.is_empty() {
        match segment {
            Segment::Key(key) => {
                if let Value::Object(map) = target {
                    map.remove(key);
                }
            }
            Segment::Index(index) => match target {
                Value::Array(items) if *index < items.len() => {
                    items.remove(*index);
                }
                Value::Object(map) => {
                    map.remove(&index.to_string());
                }
                _ => {}
            },
        }
        return;
    }

    let child = match (segment, target) {
        (Segment::Key(key), Value::Object(map)) => map.get_mut(key),
        (Segment::Index(index), Value::Array(items)) => items.get_mut(*index),
        (Segment::Index(index), Value::Object(map)) => map.get_mut(&index.to_string()),
        _ => None,
    };
    if let Some(child) = child {
        remove_in_place(child, rest);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
