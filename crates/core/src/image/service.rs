//! Upload/retrieval workflow implementation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::registry::ImageRegistry;
use crate::storage::ImageStore;

use super::error::ImageError;
use super::html;

/// Workflow service tying the object store and the identifier registry
/// together. Both collaborators are injected at construction time.
pub struct ImageService {
    store: Arc<ImageStore>,
    registry: Arc<ImageRegistry>,
}

impl ImageService {
    /// Create a new workflow service.
    #[must_use]
    pub fn new(store: Arc<ImageStore>, registry: Arc<ImageRegistry>) -> Self {
        Self { store, registry }
    }

    /// Store an uploaded image and return its fresh identifier.
    ///
    /// The registry entry is written only after the storage write lands, so
    /// a failed upload leaves no partial state.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub async fn upload(&self, bytes: Bytes, content_type: &str) -> Result<String, ImageError> {
        let image_id = self.store.store(bytes, content_type).await?;
        self.registry.insert(image_id.clone(), content_type);
        Ok(image_id)
    }

    /// Presigned URL for a previously uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NotFound`] for an unknown identifier, or a
    /// storage error if signing fails.
    pub async fn link(&self, image_id: &str) -> Result<String, ImageError> {
        let content_type = self.lookup(image_id)?;
        let url = self.store.presigned_url(image_id, &content_type).await?;
        Ok(url)
    }

    /// HTML document with the image inlined as a data URI, base64-encoded
    /// as the transport payload.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NotFound`] for an unknown identifier, or a
    /// storage error if the read fails.
    pub async fn html_embed(&self, image_id: &str) -> Result<String, ImageError> {
        let content_type = self.lookup(image_id)?;
        let bytes = self.store.fetch_bytes(image_id, &content_type).await?;
        let document = html::embed_document(&content_type, &bytes);
        Ok(STANDARD.encode(document))
    }

    /// HTML document sourcing a presigned URL, base64-encoded as the
    /// transport payload.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NotFound`] for an unknown identifier, or a
    /// storage error if signing fails.
    pub async fn html_link(&self, image_id: &str) -> Result<String, ImageError> {
        let content_type = self.lookup(image_id)?;
        let url = self.store.presigned_url(image_id, &content_type).await?;
        let document = html::link_document(&url);
        Ok(STANDARD.encode(document))
    }

    /// Raw preview HTML for interactive viewing, not base64-wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::NotFound`] for an unknown identifier, or a
    /// storage error if signing fails.
    pub async fn preview(&self, image_id: &str) -> Result<String, ImageError> {
        let content_type = self.lookup(image_id)?;
        let url = self.store.presigned_url(image_id, &content_type).await?;
        Ok(html::preview_document(&url, image_id))
    }

    /// Registry lookup; an unknown identifier short-circuits before any
    /// storage call.
    fn lookup(&self, image_id: &str) -> Result<String, ImageError> {
        self.registry
            .content_type(image_id)
            .ok_or_else(|| ImageError::not_found(image_id))
    }
}
