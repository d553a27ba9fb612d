//! Schema-driven configuration engine for the gateway dashboard.
//!
//! Takes an arbitrary JSON Schema describing a configuration document,
//! normalizes it into a renderable shape, tracks edits against the document
//! using structural paths, computes a semantic diff between the edited and
//! original snapshots, and answers search queries over the schema tree. All
//! operations are pure and synchronous; documents are never mutated in
//! place, so any number of snapshots can coexist.
//!
//! The usual flow:
//!
//! 1. Parse the gateway's [`SchemaBundle`] and [`ConfigPayload`].
//! 2. [`normalize`] the schema; render the canonical tree in lockstep with
//!    the document, reading values via [`get_path_value`] and resolving
//!    labels via [`hint_for_path`].
//! 3. Apply edits through [`EditSession::set`] / [`EditSession::remove`];
//!    drive the unsaved-changes UI from [`EditSession::changes`].
//! 4. Build the save call with [`EditSession::save_request`], which carries
//!    the load-time hash as the optimistic-concurrency precondition.

pub mod defaults;
pub mod diff;
pub mod document;
pub mod error;
pub mod hints;
pub mod normalize;
pub mod options;
pub mod path;
pub mod schema;
pub mod search;

pub use defaults::default_value;
pub use diff::{compute_changes, ChangeRecord};
pub use document::{ConfigPayload, EditSession, SaveRequest, SchemaBundle};
pub use error::EngineError;
pub use hints::{hint_for_path, sort_siblings, UiHint, UiHintMap, DEFAULT_ORDER};
pub use normalize::{normalize, NormalizeResult};
pub use options::NormalizeOptions;
pub use path::{
    get_path_value, parse_path, path_key, remove_path_value, set_path_value, Segment,
};
pub use schema::{extract_enum_values, schema_type, SchemaType};
pub use search::matches_search;
