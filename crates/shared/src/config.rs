//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Object storage configuration.
///
/// Defaults target a local MinIO instance started with its stock
/// credentials. In a multi-container deployment the internal endpoint is the
/// address this service dials, while the external endpoint is the address
/// presigned URLs must carry so that browsers outside the container network
/// can reach the store.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Endpoint this service uses to reach the object store.
    #[serde(default = "default_endpoint")]
    pub internal_endpoint: String,
    /// Externally reachable endpoint substituted into presigned URLs.
    #[serde(default = "default_endpoint")]
    pub external_endpoint: String,
    /// Access key for the object store.
    #[serde(default = "default_access_key")]
    pub access_key: String,
    /// Secret key for the object store.
    #[serde(default = "default_access_key")]
    pub secret_key: String,
    /// Region passed to the S3 client (MinIO accepts any value).
    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            internal_endpoint: default_endpoint(),
            external_endpoint: default_endpoint(),
            access_key: default_access_key(),
            secret_key: default_access_key(),
            region: default_region(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_access_key() -> String {
    "minioadmin".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PROMO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
