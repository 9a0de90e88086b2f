//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod images;
pub mod root;

/// Creates the API router with all routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(root::routes()).merge(images::routes())
}
