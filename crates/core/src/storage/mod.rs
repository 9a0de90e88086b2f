//! Object store adapter for promo images.
//!
//! Wraps an S3-compatible endpoint (MinIO in local development) behind a
//! small API: bucket initialization with bounded retry, uploads keyed by
//! generated identifier, presigned download URLs, and raw reads.
//!
//! Every operation derives the object key from the image's content type via
//! the same fixed extension table, so the key used for a read always matches
//! the key used for the original write.

mod error;
mod service;

pub use error::StorageError;
pub use service::{BUCKET, ImageStore, object_key};
