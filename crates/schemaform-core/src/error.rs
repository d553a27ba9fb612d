//! Error types for the configuration engine.
//!
//! The engine's pure functions are total over their documented input domain;
//! errors only arise at the document boundary, where raw text from the
//! gateway has to be parsed before the engine can touch it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
