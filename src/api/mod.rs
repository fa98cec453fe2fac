// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use handlers::{auth, products, purchases};
pub use state::AppState;

/// Builds the full router over `state`
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Auth routes
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Product routes
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/api/products/stats", get(products::product_stats))
        .route(
            "/api/products/:id",
            patch(products::update_product).delete(products::delete_product),
        )
        // Purchase routes
        .route(
            "/api/purchases",
            get(purchases::list_purchases).post(purchases::create_purchase),
        )
        .route("/api/purchases/stats", get(purchases::purchase_stats))
        .route(
            "/api/purchases/product-stats",
            get(purchases::product_purchase_stats),
        )
        .route("/api/purchases/:id", delete(purchases::delete_purchase))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
