//! Service greeting endpoint.

use axum::{Router, routing::get};

use crate::AppState;

/// Plain text greeting handler.
async fn greeting() -> &'static str {
    "Promo service is running!"
}

/// Creates the greeting route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(greeting))
}
