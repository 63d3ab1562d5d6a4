use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::models::{CreateProduct, ProductDocument, UpdateProduct};

/// Repository trait for Product persistence
///
/// Each call touches at most one document atomically. Documents come back
/// with their revision field; stripping it is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Number of products in the collection (no filter)
    async fn count(&self) -> ProductResult<u64>;

    /// Up to `limit` products after skipping `offset`, newest id first
    async fn find_page(&self, offset: u64, limit: i64) -> ProductResult<Vec<ProductDocument>>;

    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<ProductDocument>>;

    /// Insert a new product; unique index violations surface as `DuplicateKey`
    async fn insert(&self, input: CreateProduct) -> ProductResult<ProductDocument>;

    /// Apply the present fields and return the post-write document,
    /// or `None` when no document has this id
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<ProductDocument>>;

    /// `true` when a document was removed
    async fn delete_by_id(&self, id: ObjectId) -> ProductResult<bool>;
}
