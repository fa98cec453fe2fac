use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::BearerAuth;
use crate::api::state::AppState;
use crate::domain::purchase::{
    parse_purchase_date, NewPurchase, ProductPurchaseStats, Purchase, PurchaseStats,
};
use crate::domain::repositories::PurchaseRepository;

/// Request body for recording a purchase
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub product_name: String,
    pub price: Decimal,
    pub purchase_date: String,
}

/// Query string for listing purchases
#[derive(Debug, Default, Deserialize)]
pub struct ListPurchasesQuery {
    /// Most recent purchase date first when true
    #[serde(default)]
    pub sorted: bool,
}

/// List purchases
///
/// GET /api/purchases?sorted=true
pub async fn list_purchases(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Query(query): Query<ListPurchasesQuery>,
) -> Result<Json<Vec<Purchase>>, ApiError> {
    let repo = state.purchases.lock().await;
    let purchases = if query.sorted {
        repo.get_sorted()?
    } else {
        repo.get_all()?
    };
    Ok(Json(purchases))
}

/// Record a purchase
///
/// POST /api/purchases
pub async fn create_purchase(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Json(req): Json<CreatePurchaseRequest>,
) -> Result<(StatusCode, Json<Purchase>), ApiError> {
    let purchase_date = parse_purchase_date(&req.purchase_date)?;
    let draft = NewPurchase::new(&req.product_name, req.price, purchase_date)?;
    let purchase = state.purchases.lock().await.add(draft)?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Delete a purchase
///
/// DELETE /api/purchases/:id
pub async fn delete_purchase(
    _auth: BearerAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.purchases.lock().await.delete(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Purchase not found: {}", id)))
    }
}

/// Spending totals and top product
///
/// GET /api/purchases/stats
pub async fn purchase_stats(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> Result<Json<PurchaseStats>, ApiError> {
    let stats = state.purchases.lock().await.stats()?;
    Ok(Json(stats))
}

/// Per-product counts and totals, most purchased first
///
/// GET /api/purchases/product-stats
pub async fn product_purchase_stats(
    _auth: BearerAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductPurchaseStats>>, ApiError> {
    let stats = state.purchases.lock().await.product_stats()?;
    Ok(Json(stats))
}
