//! Promo Image Service
//!
//! Main entry point for the promo image backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promo_api::{AppState, create_router};
use promo_core::image::ImageService;
use promo_core::registry::ImageRegistry;
use promo_core::storage::ImageStore;
use promo_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "promo=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Build the object store client and block until the bucket is ready.
    // The store may start after this service; the bounded retry inside
    // ensure_bucket absorbs that. Exhausting the budget is fatal.
    let store = ImageStore::from_config(&config.storage);
    info!(
        endpoint = %config.storage.internal_endpoint,
        "object store client configured"
    );
    store.ensure_bucket().await?;

    // Create application state
    let registry = Arc::new(ImageRegistry::new());
    let service = ImageService::new(Arc::new(store), registry);
    let state = AppState {
        service: Arc::new(service),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
