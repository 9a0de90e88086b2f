//! Shared configuration for the promo image service.
//!
//! This crate provides the configuration types used by all other crates:
//! - Server bind settings
//! - Object storage endpoints and credentials

pub mod config;

pub use config::{AppConfig, ServerConfig, StorageConfig};
