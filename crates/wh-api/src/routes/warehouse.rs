//! Read-only warehouse data endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use wh_protocol::{LowStockItem, Product, Shipment, ShipmentStatus, WarehouseStats};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for the low-stock listing.
#[derive(Debug, Serialize)]
pub struct LowStockResponse {
    pub low_stock_count: usize,
    pub products: Vec<LowStockItem>,
}

/// A product with its derived stock figures.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub total_value: f64,
    pub needs_reorder: bool,
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        Self {
            total_value: product.inventory_value(),
            needs_reorder: product.is_low_stock(),
            product,
        }
    }
}

/// Query parameters for product listing.
#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    /// Category name, matched case-insensitively.
    pub category: Option<String>,
    /// Only products at or below their reorder point. Takes precedence over `category`.
    #[serde(default)]
    pub low_stock_only: bool,
}

/// Query parameters for shipment listing.
#[derive(Debug, Deserialize)]
pub struct ShipmentFilter {
    /// One of pending, in_transit, delivered, delayed.
    pub status: Option<String>,
}

/// GET /api/v1/warehouse/stats: aggregate statistics.
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<WarehouseStats>> {
    Ok(Json(state.stats().await?))
}

/// GET /api/v1/warehouse/low-stock: products at or below reorder point.
pub async fn low_stock(State(state): State<AppState>) -> ApiResult<Json<LowStockResponse>> {
    let products = state.low_stock().await?;
    Ok(Json(LowStockResponse {
        low_stock_count: products.len(),
        products,
    }))
}

/// GET /api/v1/warehouse/products: list products.
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> ApiResult<Json<Vec<Product>>> {
    let products = if filter.low_stock_only {
        state.low_stock_products().await?
    } else {
        state.products(filter.category.as_deref()).await?
    };
    Ok(Json(products))
}

/// GET /api/v1/warehouse/products/{id}: product details with stock value
/// and reorder flag.
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Json<ProductDetail>> {
    state
        .product(&product_id)
        .await?
        .map(|product| Json(ProductDetail::from(product)))
        .ok_or_else(|| ApiError::NotFound(format!("product '{product_id}' not found")))
}

/// GET /api/v1/warehouse/shipments: list shipments.
pub async fn list_shipments(
    State(state): State<AppState>,
    Query(filter): Query<ShipmentFilter>,
) -> ApiResult<Json<Vec<Shipment>>> {
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<ShipmentStatus>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.shipments(status).await?))
}
