use thiserror::Error;

use shopseed_auth::AuthzError;

/// Failure reported by a storage port.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Unauthorized(#[from] AuthzError),

    /// The record references something the store does not know.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn poisoned() -> Self {
        Self::Unavailable("lock poisoned".to_string())
    }
}
