//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId, to_bson, to_document},
    options::{FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, ProductDocument, UpdateProduct};
use crate::repository::ProductRepository;

/// Default collection name
pub const PRODUCTS_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the unique and text indexes the API relies on
    ///
    /// Idempotent: re-creating an identical index is a no-op on the server.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        self.collection.create_indexes(product_indexes()).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }
}

pub(crate) fn product_indexes() -> Vec<IndexModel> {
    vec![
        IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_name_unique".to_string())
                    .build(),
            )
            .build(),
        IndexModel::builder()
            .keys(doc! { "sku": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .sparse(true)
                    .name("idx_sku_unique".to_string())
                    .build(),
            )
            .build(),
        // Backs the search endpoint
        IndexModel::builder()
            .keys(doc! { "name": "text", "description": "text", "tags": "text" })
            .options(
                IndexOptions::builder()
                    .name("idx_text_search".to_string())
                    .build(),
            )
            .build(),
    ]
}

/// `$set` the present fields plus `updated_at`, and bump the revision.
fn update_document(input: &UpdateProduct) -> ProductResult<Document> {
    let mut set = to_document(input)?;
    set.insert("updated_at", to_bson(&Utc::now())?);

    Ok(doc! {
        "$set": set,
        "$inc": { "__v": 1 },
    })
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn find_page(&self, offset: u64, limit: i64) -> ProductResult<Vec<ProductDocument>> {
        let options = FindOptions::builder()
            .skip(offset)
            .limit(limit)
            .sort(doc! { "_id": -1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let products: Vec<ProductDocument> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<ProductDocument>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn insert(&self, input: CreateProduct) -> ProductResult<ProductDocument> {
        let product = ProductDocument::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update_by_id(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Option<ProductDocument>> {
        let update = update_document(&input)?;

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        let deleted = result.deleted_count > 0;
        if deleted {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(deleted)
    }
}
