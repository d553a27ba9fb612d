//! Per-path UI metadata with wildcard patterns, and sibling ordering.
//!
//! Hints are loaded once per schema fetch and read-only thereafter. They are
//! keyed by a dot-joined path pattern in which any segment may be the
//! wildcard literal `*`. Resolution is exact-match first; wildcard patterns
//! are consulted only when no exact entry exists, and among equally eligible
//! wildcard patterns the first in map iteration order wins. The map is a
//! `BTreeMap`, so that tie-break is at least deterministic — overlapping
//! wildcard patterns for the same path shape should still be avoided.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::path::{path_key, Segment};

/// The `order` used for keys without a hint (and for hints that omit it).
pub const DEFAULT_ORDER: i64 = 50;

/// UI metadata for one path pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiHint {
    pub label: Option<String>,
    pub help: Option<String>,
    pub group: Option<String>,
    pub placeholder: Option<String>,
    pub advanced: bool,
    pub sensitive: bool,
    pub order: i64,
}

impl Default for UiHint {
    fn default() -> Self {
        Self {
            label: None,
            help: None,
            group: None,
            placeholder: None,
            advanced: false,
            sensitive: false,
            order: DEFAULT_ORDER,
        }
    }
}

/// Hint collection keyed by dot-joined path pattern.
pub type UiHintMap = BTreeMap<String, UiHint>;

/// Resolve the hint for a concrete path. Exact match always wins over any
/// wildcard match.
pub fn hint_for_path<'a>(path: &[Segment], hints: &'a UiHintMap) -> Option<&'a UiHint> {
    if let Some(hint) = hints.get(&path_key(path)) {
        return Some(hint);
    }

    let rendered: Vec<String> = path.iter().map(|segment| segment.to_string()).collect();
    hints
        .iter()
        .find(|(pattern, _)| pattern_matches(pattern, &rendered))
        .map(|(_, hint)| hint)
}

/// Segment-wise pattern match: equal segment counts, every non-`*` pattern
/// segment equal to the corresponding path segment.
fn pattern_matches(pattern: &str, rendered: &[String]) -> bool {
    if rendered.is_empty() {
        return false;
    }
    let parts: Vec<&str> = pattern.split('.').collect();
    parts.len() == rendered.len()
        && parts
            .iter()
            .zip(rendered)
            .all(|(part, segment)| *part == "*" || *part == segment.as_str())
}

/// Deterministic ordering for sibling keys at `path`: ascending by resolved
/// hint `order` (default 50), ties broken lexically by key.
pub fn sort_siblings(keys: &[String], path: &[Segment], hints: &UiHintMap) -> Vec<String> {
    let mut sorted = keys.to_vec();
    sorted.sort_by(|a, b| {
        sibling_order(path, a, hints)
            .cmp(&sibling_order(path, b, hints))
            .then_with(|| a.cmp(b))
    });
    sorted
}

fn sibling_order(path: &[Segment], key: &str, hints: &UiHintMap) -> i64 {
    let mut child = path.to_vec();
    child.push(Segment::Key(key.to_string()));
    hint_for_path(&child, hints)
        .map(|hint| hint.order)
        .unwrap_or(DEFAULT_ORDER)
}

// ===========================================================================
// Tests
// ===========================================================================
