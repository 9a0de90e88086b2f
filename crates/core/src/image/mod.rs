//! Upload/retrieval workflow for promo images.
//!
//! Receives raw bytes and a declared content type, delegates storage, and
//! records the identifier to content-type mapping. On the read side it
//! resolves an identifier to a presigned URL, an HTML document embedding
//! the image, or the raw HTML for interactive preview.

mod error;
mod html;
mod service;

pub use error::ImageError;
pub use service::ImageService;
