//! API route definitions and router builder.

pub mod analyze;
pub mod chat;
pub mod health;
pub mod query;
pub mod warehouse;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Assistant endpoints
        .route("/chat", post(chat::chat))
        .route("/analyze", post(analyze::analyze))
        .route("/warehouse/query", post(query::warehouse_query))
        // Warehouse data
        .route("/warehouse/stats", get(warehouse::stats))
        .route("/warehouse/low-stock", get(warehouse::low_stock))
        .route("/warehouse/products", get(warehouse::list_products))
        .route("/warehouse/products/{id}", get(warehouse::get_product))
        .route("/warehouse/shipments", get(warehouse::list_shipments));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
