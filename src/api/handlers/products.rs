use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::BearerAuth;
use crate::api::state::AppState;
use crate::domain::product::{NewProduct, Product, ProductStats, ProductUpdate};
use crate::domain::repositories::ProductRepository;

/// Request body for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
}

/// Request body for a partial product update
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl UpdateProductRequest {
    fn into_update(self) -> Result<ProductUpdate, ApiError> {
        let mut update = ProductUpdate::new();
        if let Some(name) = self.name {
            update = update.with_name(&name)?;
        }
        if let Some(price) = self.price {
            update = update.with_price(price)?;
        }
        Ok(update)
    }
}

/// List all products in insertion order
///
/// GET /api/products
pub async fn list_products(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.products.lock().await.get_all()?;
    Ok(Json(products))
}

/// Create a product
///
/// POST /api/products
pub async fn create_product(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = NewProduct::new(&req.name, req.price)?;
    let product = state.products.lock().await.add(draft)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product
///
/// PATCH /api/products/:id
pub async fn update_product(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let update = req.into_update()?;
    let updated = state.products.lock().await.update(&id, &update)?;
    updated
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", id)))
}

/// Delete a product
///
/// DELETE /api/products/:id
pub async fn delete_product(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.products.lock().await.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Product not found: {}", id)))
    }
}

/// Catalog statistics
///
/// GET /api/products/stats
pub async fn product_stats(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> Result<Json<ProductStats>, ApiError> {
    let stats = state.products.lock().await.stats()?;
    Ok(Json(stats))
}
