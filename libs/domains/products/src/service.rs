//! Product Service - Business logic layer

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, DeleteResponse, Pagination, Product, ProductDocument, ProductPage,
    UpdateProduct,
};
use crate::repository::ProductRepository;

/// Product service providing the CRUD operations
///
/// Validates input, applies pagination defaults and turns stored documents
/// into client-facing [`Product`]s.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let created = self.repository.insert(input).await?;
        Ok(created.into())
    }

    /// One page of products, newest first, with the total collection size.
    #[instrument(skip(self))]
    pub async fn list_products(&self, pagination: Pagination) -> ProductResult<ProductPage> {
        pagination.validate()?;

        let limit = pagination.limit();
        let page = pagination.page();

        let total = self.repository.count().await?;
        let documents = if pagination.is_past_storage_range() {
            Vec::new()
        } else {
            self.repository
                .find_page(pagination.offset(), limit)
                .await?
        };

        Ok(ProductPage {
            total,
            page,
            limit,
            data: documents.into_iter().map(Product::from).collect(),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ObjectId) -> ProductResult<Product> {
        self.find_existing(id).await.map(Product::from)
    }

    /// Partial update; the returned product is the stored post-write state.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: ObjectId,
        input: UpdateProduct,
    ) -> ProductResult<Product> {
        input.validate()?;

        self.find_existing(id).await?;

        // Deleted between the lookup and the write
        self.repository
            .update_by_id(id, input)
            .await?
            .map(Product::from)
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ObjectId) -> ProductResult<DeleteResponse> {
        self.find_existing(id).await?;

        if !self.repository.delete_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(DeleteResponse::deleted(id))
    }

    async fn find_existing(&self, id: ObjectId) -> ProductResult<ProductDocument> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_PAGE_LIMIT;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;

    fn document(name: &str) -> ProductDocument {
        ProductDocument::new(CreateProduct {
            name: name.to_string(),
            description: String::new(),
            price: 1000,
            stock: 1,
            sku: None,
            tags: vec![],
        })
    }

    fn create_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: "A product".to_string(),
            price: 1999,
            stock: 4,
            sku: Some("SKU-1".to_string()),
            tags: vec!["new".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_product_returns_stored_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|input| Ok(ProductDocument::new(input)));

        let service = ProductService::new(repo);
        let product = service.create_product(create_input("Lamp")).await.unwrap();

        assert_eq!(product.name, "Lamp");
        assert_eq!(product.sku.as_deref(), Some("SKU-1"));
        assert_eq!(product.id.len(), 24);
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().never();

        let service = ProductService::new(repo);
        let mut input = create_input("Lamp");
        input.price = -5;

        let result = service.create_product(input).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_product_propagates_duplicate_key() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .returning(|_| Err(ProductError::DuplicateKey(r#"{ name: "Lamp" }"#.to_string())));

        let service = ProductService::new(repo);
        let err = service
            .create_product(create_input("Lamp"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains(r#"{ name: "Lamp" }"#));
    }

    #[tokio::test]
    async fn test_list_products_uses_defaults() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().times(1).returning(|| Ok(12));
        repo.expect_find_page()
            .with(eq(0u64), eq(5i64))
            .times(1)
            .returning(|_, _| Ok(vec![document("b"), document("a")]));

        let service = ProductService::new(repo);
        let page = service.list_products(Pagination::default()).await.unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 5);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].name, "b");
    }

    #[tokio::test]
    async fn test_list_products_computes_offset() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|| Ok(12));
        repo.expect_find_page()
            .with(eq(10u64), eq(5i64))
            .times(1)
            .returning(|_, _| Ok(vec![document("c"), document("d")]));

        let service = ProductService::new(repo);
        let page = service
            .list_products(Pagination {
                limit: Some(5),
                page: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(page.total, 12);
        assert_eq!(page.page, 3);
        assert_eq!(page.data.len(), 2);
    }

    #[tokio::test]
    async fn test_list_products_past_the_end_is_empty() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_find_page()
            .with(eq(45u64), eq(5i64))
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        let page = service
            .list_products(Pagination {
                limit: None,
                page: Some(10),
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_list_products_huge_page_is_empty_without_query() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().times(1).returning(|| Ok(7));
        repo.expect_find_page().never();

        let service = ProductService::new(repo);
        let page = service
            .list_products(Pagination {
                limit: Some(MAX_PAGE_LIMIT),
                page: Some(100_000_000_000_000_000),
            })
            .await
            .unwrap();

        assert_eq!(page.total, 7);
        assert_eq!(page.page, 100_000_000_000_000_000);
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_list_products_rejects_limit_over_max() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().never();
        repo.expect_find_page().never();

        let service = ProductService::new(repo);
        let result = service
            .list_products(Pagination {
                limit: Some(MAX_PAGE_LIMIT + 1),
                page: None,
            })
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let id = ObjectId::new();
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_get_product_found() {
        let doc = document("Lamp");
        let id = doc.id;
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(doc.clone())));

        let service = ProductService::new(repo);
        let product = service.get_product(id).await.unwrap();

        assert_eq!(product.id, id.to_hex());
        assert_eq!(product.name, "Lamp");
    }

    #[tokio::test]
    async fn test_update_product_returns_post_write_state() {
        let existing = document("Lamp");
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update_by_id()
            .withf(move |update_id, input| *update_id == id && input.price == Some(500))
            .times(1)
            .returning(|id, input| {
                let mut doc = document("Lamp");
                doc.id = id;
                doc.price = input.price.unwrap_or(doc.price);
                doc.revision += 1;
                Ok(Some(doc))
            });

        let service = ProductService::new(repo);
        let update = UpdateProduct {
            price: Some(500),
            ..Default::default()
        };
        let product = service.update_product(id, update).await.unwrap();

        assert_eq!(product.price, 500);
        assert_eq!(product.name, "Lamp");
    }

    #[tokio::test]
    async fn test_update_product_missing_skips_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update_by_id().never();

        let service = ProductService::new(repo);
        let result = service
            .update_product(ObjectId::new(), UpdateProduct::default())
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_product_deleted_concurrently() {
        let existing = document("Lamp");
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update_by_id().returning(|_, _| Ok(None));

        let service = ProductService::new(repo);
        let result = service.update_product(id, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_product_rejects_invalid_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().never();

        let service = ProductService::new(repo);
        let update = UpdateProduct {
            name: Some(String::new()),
            ..Default::default()
        };
        let result = service.update_product(ObjectId::new(), update).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_product_returns_message() {
        let existing = document("Lamp");
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_delete_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(true));

        let service = ProductService::new(repo);
        let response = service.delete_product(id).await.unwrap();

        assert_eq!(response.message, format!("{} deleted", id.to_hex()));
    }

    #[tokio::test]
    async fn test_delete_product_missing_skips_delete() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete_by_id().never();

        let service = ProductService::new(repo);
        let result = service.delete_product(ObjectId::new()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_product_lost_race() {
        let existing = document("Lamp");
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_delete_by_id().returning(|_| Ok(false));

        let service = ProductService::new(repo);
        let result = service.delete_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_database_error() {
        let mut repo = MockProductRepository::new();
        repo.expect_count()
            .returning(|| Err(ProductError::Database("connection reset".to_string())));

        let service = ProductService::new(repo);
        let result = service.list_products(Pagination::default()).await;

        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
