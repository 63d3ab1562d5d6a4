//! Products Domain
//!
//! CRUD and text search for products stored in MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │          Handlers           │  ← HTTP endpoints
//! └──────┬───────────────┬──────┘
//!        │               │
//! ┌──────▼──────┐ ┌──────▼──────┐
//! │   Service   │ │   Search    │  ← Pagination, validation │ $text queries
//! └──────┬──────┘ └──────┬──────┘
//!        │               │
//! ┌──────▼──────┐        │
//! │ Repository  │        │        ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘        │
//!        │               │
//! ┌──────▼───────────────▼──────┐
//! │           Models            │  ← Stored documents, DTOs
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_products::{
//!     handlers, MongoProductRepository, MongoProductSearch, ProductService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let service = ProductService::new(repository);
//! let search = Arc::new(MongoProductSearch::new(&db));
//!
//! let router = handlers::router(service, search);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod search;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, DEFAULT_PAGE, DEFAULT_PAGE_LIMIT, DeleteResponse, MAX_PAGE_LIMIT, Pagination,
    Product, ProductDocument, ProductPage, UpdateProduct,
};
pub use self::mongodb::{MongoProductRepository, PRODUCTS_COLLECTION};
pub use repository::ProductRepository;
pub use search::{MongoProductSearch, ProductSearch, SEARCH_RESULT_LIMIT};
pub use service::ProductService;
