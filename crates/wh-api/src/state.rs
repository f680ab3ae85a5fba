//! Shared application state for the Axum server.
//!
//! Supports two modes:
//! - **Database mode**: uses `PgPool` for persistent storage (production).
//! - **In-memory mode**: serves an `Inventory` (tests and development).
//!
//! Handlers read warehouse data through the methods here, which pick the
//! backing store.

use std::sync::Arc;

use sqlx::PgPool;
use wh_nlu::{BriefingStyle, Inventory, QueryProcessor};
use wh_protocol::{LowStockItem, Product, Shipment, ShipmentStatus, WarehouseSnapshot, WarehouseStats};

use crate::db;
use crate::error::ApiResult;
use crate::inference::{CompletionEngine, OfflineEngine};

/// Shared application state, cheap to clone into each handler.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool (None in test/in-memory mode).
    pub pool: Option<PgPool>,
    /// In-memory warehouse (used when pool is None).
    pub inventory: Arc<Inventory>,
    /// Compiled query-understanding tables.
    pub processor: Arc<QueryProcessor>,
    /// Language model used for free-form answers.
    pub llm: Arc<dyn CompletionEngine>,
    pub briefing_style: BriefingStyle,
}

impl AppState {
    fn build(pool: Option<PgPool>, inventory: Inventory) -> Self {
        Self {
            pool,
            inventory: Arc::new(inventory),
            processor: Arc::new(QueryProcessor::standard()),
            llm: Arc::new(OfflineEngine),
            briefing_style: BriefingStyle::default(),
        }
    }

    /// Create state backed by a PostgreSQL pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self::build(Some(pool), Inventory::default())
    }

    /// Create empty in-memory state (for tests).
    pub fn new() -> Self {
        Self::build(None, Inventory::default())
    }

    /// Create in-memory state with the sample warehouse.
    pub fn with_sample_data() -> Self {
        Self::build(None, Inventory::with_sample_data())
    }

    pub fn with_engine(mut self, llm: Arc<dyn CompletionEngine>) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_briefing_style(mut self, style: BriefingStyle) -> Self {
        self.briefing_style = style;
        self
    }

    /// Everything the briefing may draw on.
    pub async fn snapshot(&self) -> ApiResult<WarehouseSnapshot> {
        match &self.pool {
            Some(pool) => Ok(db::stats::snapshot(pool).await?),
            None => Ok(self.inventory.snapshot()),
        }
    }

    pub async fn stats(&self) -> ApiResult<WarehouseStats> {
        match &self.pool {
            Some(pool) => Ok(db::stats::warehouse_stats(pool).await?),
            None => Ok(self.inventory.stats()),
        }
    }

    pub async fn low_stock(&self) -> ApiResult<Vec<LowStockItem>> {
        let products = self.low_stock_products().await?;
        Ok(products.iter().map(LowStockItem::from).collect())
    }

    /// Full records of products at or below their reorder point.
    pub async fn low_stock_products(&self) -> ApiResult<Vec<Product>> {
        match &self.pool {
            Some(pool) => Ok(db::products::list_low_stock(pool).await?),
            None => Ok(self.inventory.low_stock().into_iter().cloned().collect()),
        }
    }

    /// All products, or those in `category` (case-insensitive).
    pub async fn products(&self, category: Option<&str>) -> ApiResult<Vec<Product>> {
        match (&self.pool, category) {
            (Some(pool), Some(category)) => Ok(db::products::list_by_category(pool, category).await?),
            (Some(pool), None) => Ok(db::products::list_all(pool).await?),
            (None, Some(category)) => Ok(self
                .inventory
                .products_in_category(category)
                .into_iter()
                .cloned()
                .collect()),
            (None, None) => Ok(self.inventory.products().to_vec()),
        }
    }

    /// All shipments, or those in `status`.
    pub async fn shipments(&self, status: Option<ShipmentStatus>) -> ApiResult<Vec<Shipment>> {
        match (&self.pool, status) {
            (Some(pool), Some(status)) => Ok(db::shipments::list_by_status(pool, status).await?),
            (Some(pool), None) => Ok(db::shipments::list_all(pool).await?),
            (None, Some(status)) => Ok(self
                .inventory
                .shipments_with_status(status)
                .into_iter()
                .cloned()
                .collect()),
            (None, None) => Ok(self.inventory.shipments().to_vec()),
        }
    }

    pub async fn product(&self, id: &str) -> ApiResult<Option<Product>> {
        match &self.pool {
            Some(pool) => Ok(db::products::get_by_id(pool, id).await?),
            None => Ok(self.inventory.product(id).cloned()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
