use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Page size used when the client sends no `limit`.
pub const DEFAULT_PAGE_LIMIT: i64 = 5;

/// Largest `limit` a client may request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// 1-based page used when the client sends no `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Product as stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in minor units (cents)
    pub price: i64,
    #[serde(default)]
    pub stock: i32,
    /// Absent rather than null, so the sparse unique index skips it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every update
    #[serde(rename = "__v", default)]
    pub revision: i32,
}

impl ProductDocument {
    /// Fresh document with a new ObjectId and revision 0.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            sku: input.sku,
            tags: input.tags,
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }
}

/// Product as returned to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// 24-character hex ObjectId
    #[schema(example = "65f1c0ffee0ddba11ca7b0de")]
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in cents
    pub price: i64,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            price: doc.price,
            stock: doc.stock,
            sku: doc.sku,
            tags: doc.tags,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for a partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50))]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// `?limit=&page=` query for listing products
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page size, 1 to 100 (default 5)
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// 1-based page number (default 1)
    #[validate(range(min = 1))]
    pub page: Option<u64>,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }

    pub fn page(&self) -> u64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Documents skipped before this page: `(page - 1) * limit`.
    ///
    /// Saturates; the store only accepts skips up to `i64::MAX`, see
    /// [`Pagination::is_past_storage_range`].
    pub fn offset(&self) -> u64 {
        let limit = u64::try_from(self.limit()).unwrap_or(0);
        self.page().saturating_sub(1).saturating_mul(limit)
    }

    /// `true` when the offset cannot be sent as a skip, so the page is empty
    /// for any collection the store can hold.
    pub fn is_past_storage_range(&self) -> bool {
        i64::try_from(self.offset()).is_err()
    }
}

/// One page of products plus the unfiltered collection size
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub total: u64,
    pub page: u64,
    pub limit: i64,
    pub data: Vec<Product>,
}

/// Confirmation body for a delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "65f1c0ffee0ddba11ca7b0de deleted")]
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(id: ObjectId) -> Self {
        Self {
            message: format!("{} deleted", id.to_hex()),
        }
    }
}
