//! Workflow error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Upload/retrieval workflow errors.
#[derive(Debug, Error)]
pub enum ImageError {
    /// No registry entry for the identifier.
    #[error("image not found: {0}")]
    NotFound(String),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ImageError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(image_id: impl Into<String>) -> Self {
        Self::NotFound(image_id.into())
    }
}
