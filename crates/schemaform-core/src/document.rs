//! Boundary documents exchanged with the gateway, and the editing session.
//!
//! The gateway serves a schema document and a configuration document; the
//! engine edits an in-memory copy and, at save time, hands back a
//! re-serialized document together with the load-time content hash as the
//! optimistic-concurrency precondition token. The gateway performs the
//! actual calls and rejects a save whose token no longer matches the live
//! document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::{compute_changes, ChangeRecord};
use crate::error::EngineError;
use crate::hints::UiHintMap;
use crate::path::{get_path_value, remove_path_value, set_path_value, Segment};

/// Schema document as served by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaBundle {
    /// Raw schema tree; run it through [`crate::normalize`] before rendering.
    pub schema: Value,
    /// Per-path UI metadata, keyed by dot-joined pattern.
    #[serde(default)]
    pub ui_hints: UiHintMap,
    pub version: String,
    pub generated_at: String,
}

/// Configuration document as served by the gateway. `hash` is an opaque
/// content fingerprint; `valid` reflects the gateway's own validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPayload {
    pub raw: String,
    pub hash: String,
    pub path: String,
    pub valid: bool,
}

/// Save call payload: the re-serialized document plus the hash observed at
/// load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub raw: String,
    pub base_hash: String,
}

/// An editing session over one configuration document.
///
/// Holds the load-time snapshot alongside the current document. Every edit
/// replaces the current document with a new value, so the snapshot stays
/// intact for diffing and any number of earlier references remain valid.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Value,
    current: Value,
    base_hash: String,
    config_path: String,
}

impl EditSession {
    /// Parse the gateway payload and open a session on it. This is the only
    /// fallible entry point — past it, every operation is total.
    pub fn open(payload: &ConfigPayload) -> Result<Self, EngineError> {
        let document: Value = serde_json::from_str(&payload.raw)?;
        Ok(Self::from_document(
            document,
            payload.hash.clone(),
            payload.path.clone(),
        ))
    }

    /// Open a session over an already-parsed document.
    pub fn from_document(
        document: Value,
        hash: impl Into<String>,
        config_path: impl Into<String>,
    ) -> Self {
        Self {
            original: document.clone(),
            current: document,
            base_hash: hash.into(),
            config_path: config_path.into(),
        }
    }

    /// The load-time snapshot.
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The document with all edits applied.
    pub fn current(&self) -> &Value {
        &self.current
    }

    /// Gateway-side location of the document.
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    /// The content hash observed at load time.
    pub fn base_hash(&self) -> &str {
        &self.base_hash
    }

    /// Read the value at `path` in the current document.
    pub fn get(&self, path: &[Segment]) -> Option<&Value> {
        get_path_value(&self.current, path)
    }

    /// Write `value` at `path`, replacing the current document.
    pub fn set(&mut self, path: &[Segment], value: Value) {
        self.current = set_path_value(&self.current, path, value);
    }

    /// Remove the value at `path`, replacing the current document.
    pub fn remove(&mut self, path: &[Segment]) {
        self.current = remove_path_value(&self.current, path);
    }

    /// Leaf-level differences between the snapshot and the current document.
    pub fn changes(&self) -> Vec<ChangeRecord> {
        compute_changes(&self.original, &self.current)
    }

    /// Whether any edit survives against the snapshot.
    pub fn is_dirty(&self) -> bool {
        self.original != self.current
    }

    /// Discard all edits, restoring the snapshot.
    pub fn revert(&mut self) {
        self.current = self.original.clone();
    }

    /// Build the save payload: the current document serialized (pretty, with
    /// a trailing newline) plus the load-time hash as precondition token.
    pub fn save_request(&self) -> Result<SaveRequest, EngineError> {
        let mut raw = serde_json::to_string_pretty(&self.current)?;
        raw.push('\n');
        Ok(SaveRequest {
            raw,
            base_hash: self.base_hash.clone(),
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
