//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, MongoProductSearch, ProductService, handlers};
use std::sync::Arc;

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    let search = Arc::new(MongoProductSearch::new(&state.db));
    handlers::router(service, search)
}

/// Initialize products indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoProductRepository::new(&state.db);
    repository.init_indexes().await?;
    Ok(())
}
