//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
///
/// Products live at `/product`; operational probes under `/api`.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/product", products::router(state))
        .nest("/api", health::router(state))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
