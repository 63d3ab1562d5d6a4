//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson, ValidatedQuery,
    errors::responses::{
        BadRequestDuplicateKeyResponse, BadRequestNotFoundResponse, BadRequestObjectIdResponse,
        BadRequestValidationResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    CreateProduct, DeleteResponse, Pagination, Product, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::search::ProductSearch;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        list_products,
        get_product,
        update_product,
        delete_product,
        search_products,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, Pagination, ProductPage, DeleteResponse),
        responses(
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            BadRequestNotFoundResponse,
            BadRequestDuplicateKeyResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Shared by every products handler
pub struct ProductsState<R: ProductRepository> {
    pub service: ProductService<R>,
    pub search: Arc<dyn ProductSearch>,
}

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    search: Arc<dyn ProductSearch>,
) -> Router {
    let state = Arc::new(ProductsState { service, search });

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search/{text}", get(search_products))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .with_state(state)
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestDuplicateKeyResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = state.service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// List products, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(Pagination),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, response = BadRequestValidationResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
) -> ProductResult<Json<ProductPage>> {
    let page = state.service.list_products(pagination).await?;
    Ok(Json(page))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestNotFoundResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<Product>> {
    let product = state.service.get_product(id).await?;
    Ok(Json(product))
}

/// Partially update a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId (24 hex characters)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product after the update", body = Product),
        (status = 400, response = BadRequestObjectIdResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = state.service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product deleted", body = DeleteResponse),
        (status = 400, response = BadRequestNotFoundResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ProductResult<Json<DeleteResponse>> {
    let response = state.service.delete_product(id).await?;
    Ok(Json(response))
}

/// Free-text search over name, description and tags
#[utoipa::path(
    get,
    path = "/search/{text}",
    tag = "Products",
    params(
        ("text" = String, Path, description = "Search terms")
    ),
    responses(
        (status = 200, description = "Matching products, best match first", body = Vec<Product>)
    )
)]
async fn search_products<R: ProductRepository>(
    State(state): State<Arc<ProductsState<R>>>,
    Path(text): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.search.search(&text).await?;
    Ok(Json(products))
}
