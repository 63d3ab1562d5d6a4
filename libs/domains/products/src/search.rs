//! Free-text product search, served straight from the handlers

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{Collection, Database, bson::doc, options::FindOptions};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductDocument};
use crate::mongodb::PRODUCTS_COLLECTION;

/// Most hits a single search returns.
pub const SEARCH_RESULT_LIMIT: i64 = 50;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Products matching `text`, best match first
    async fn search(&self, text: &str) -> ProductResult<Vec<Product>>;
}

/// `$text` search over the name/description/tags text index
pub struct MongoProductSearch {
    collection: Collection<ProductDocument>,
}

impl MongoProductSearch {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<ProductDocument>(collection_name),
        }
    }
}

#[async_trait]
impl ProductSearch for MongoProductSearch {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> ProductResult<Vec<Product>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let options = FindOptions::builder()
            .limit(SEARCH_RESULT_LIMIT)
            .sort(doc! { "score": { "$meta": "textScore" } })
            .build();

        let cursor = self
            .collection
            .find(doc! { "$text": { "$search": text } })
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        tracing::debug!(hits = documents.len(), "Product search completed");
        Ok(documents.into_iter().map(Product::from).collect())
    }
}
