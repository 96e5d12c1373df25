//! Product endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::{AppError, AppResult},
    models::Product,
};

#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    /// Case-insensitive substring match on name, description or SKU
    pub search: Option<String>,
    /// Exact case-insensitive category match
    pub category: Option<String>,
    /// One of price_asc, price_desc, name_asc, name_desc, newest, oldest
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// List active products with search, sort and pagination
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "List of products", body = Vec<Product>)
    )
)]
pub async fn list_products(
    State(state): State<crate::AppState>,
    Query(query): Query<ProductListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let products = state
        .services
        .products
        .list(
            query.search.as_deref(),
            query.category.as_deref(),
            query.sort.as_deref(),
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(10),
        )
        .await;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Product>> {
    let product = state
        .services
        .products
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;
    Ok(Json(product))
}

/// Get an active product by SKU
#[utoipa::path(
    get,
    path = "/api/products/by-sku/{sku}",
    tag = "products",
    params(("sku" = String, Path, description = "SKU, matched case-insensitively")),
    responses(
        (status = 200, description = "Product details", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_by_sku(
    State(state): State<crate::AppState>,
    Path(sku): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state
        .services
        .products
        .get_by_sku(&sku)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Product with SKU {} not found", sku)))?;
    Ok(Json(product))
}

/// Add a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing name or SKU, negative price, or duplicate SKU")
    )
)]
pub async fn create_product(
    State(state): State<crate::AppState>,
    Json(product): Json<Product>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Product>)> {
    if product.name.is_empty() || product.sku.is_empty() {
        return Err(AppError::Validation("Name and SKU are required".to_string()));
    }
    if product.price < Decimal::ZERO {
        return Err(AppError::Validation("Price cannot be negative".to_string()));
    }

    let created = state.services.products.add(product).await?;
    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format!("/api/products/{}", created.product_id),
        )],
        Json(created),
    ))
}

/// Update an existing product (whole-record replace)
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = Product,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(product): Json<Product>,
) -> AppResult<Json<Product>> {
    let updated = state.services.products.update(id, product).await?;
    Ok(Json(updated))
}

/// Soft-delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product soft-deleted"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state
        .services
        .products
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

    state.services.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
