//! Configuration for schema normalization.

use serde::{Deserialize, Serialize};

/// Options for schema normalization.
///
/// ## Serialization Format
///
/// Fields are serialized in `kebab-case` (e.g., `max-depth`). This naming
/// convention is part of the public API contract for config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NormalizeOptions {
    /// Maximum traversal depth (stack overflow guard). Subtrees past this
    /// depth are recorded as unsupported and returned unnormalized rather
    /// than erroring — the caller falls back to raw-text editing for them.
    pub max_depth: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self { max_depth: 50 }
    }
}
