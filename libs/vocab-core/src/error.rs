//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using StoreError.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the file-backed stores.
///
/// These stay internal to the storage layer: public operations recover by
/// logging and returning an empty/default result, per the engine's
/// degrade-to-nothing-happened policy.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
