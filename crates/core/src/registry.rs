//! In-memory identifier registry.
//!
//! Process-lifetime mapping from issued image identifier to the content
//! type declared at upload. Every read-side operation consults it to
//! re-derive the storage key, so the content type recorded here is the
//! single source of truth. Entries are lost on restart by design.

use dashmap::DashMap;

/// Concurrent map from image identifier to content type.
///
/// Safe for simultaneous reads and writes from concurrent requests. Owned
/// by the caller and injected into the workflow, never ambient state.
#[derive(Debug, Default)]
pub struct ImageRegistry {
    entries: DashMap<String, String>,
}

impl ImageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the content type for an issued identifier.
    pub fn insert(&self, image_id: impl Into<String>, content_type: impl Into<String>) {
        self.entries.insert(image_id.into(), content_type.into());
    }

    /// Look up the content type for an identifier.
    #[must_use]
    pub fn content_type(&self, image_id: &str) -> Option<String> {
        self.entries.get(image_id).map(|entry| entry.value().clone())
    }

    /// Number of registered images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no image has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
