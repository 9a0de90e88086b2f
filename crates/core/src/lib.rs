//! Core business logic for the promo image service.
//!
//! This crate contains the storage and workflow logic with ZERO web
//! dependencies. The HTTP surface lives in `promo-api`.
//!
//! # Modules
//!
//! - `storage` - Object store adapter (bucket lifecycle, uploads, presigned URLs)
//! - `registry` - In-memory identifier to content-type registry
//! - `image` - Upload/retrieval workflow and HTML rendering

pub mod image;
pub mod registry;
pub mod storage;
