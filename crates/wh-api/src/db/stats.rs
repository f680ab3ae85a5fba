//! Aggregate warehouse statistics computed in SQL.

use std::collections::BTreeMap;

use sqlx::PgPool;
use wh_protocol::{LowStockItem, WarehouseSnapshot, WarehouseStats, round2};

use super::products;

#[derive(Debug, sqlx::FromRow)]
struct TotalsRow {
    total_products: i64,
    low_stock_products: i64,
    total_inventory_value: f64,
    average_stock_level: f64,
}

/// Compute totals plus per-category and per-status counts.
pub async fn warehouse_stats(pool: &PgPool) -> Result<WarehouseStats, sqlx::Error> {
    let totals = sqlx::query_as::<_, TotalsRow>(
        "SELECT COUNT(*)::BIGINT AS total_products,
                COUNT(*) FILTER (WHERE stock_level <= reorder_point)::BIGINT AS low_stock_products,
                COALESCE(SUM(stock_level * unit_price), 0)::DOUBLE PRECISION AS total_inventory_value,
                COALESCE(AVG(stock_level), 0)::DOUBLE PRECISION AS average_stock_level
         FROM products",
    )
    .fetch_one(pool)
    .await?;

    let categories = grouped_counts(
        pool,
        "SELECT category, COUNT(*)::BIGINT FROM products GROUP BY category",
    )
    .await?;
    let shipment_status = grouped_counts(
        pool,
        "SELECT status, COUNT(*)::BIGINT FROM shipments GROUP BY status",
    )
    .await?;

    Ok(WarehouseStats {
        total_products: totals.total_products as u64,
        low_stock_products: totals.low_stock_products as u64,
        total_inventory_value: round2(totals.total_inventory_value),
        categories,
        shipment_status,
        average_stock_level: round2(totals.average_stock_level),
    })
}

async fn grouped_counts(pool: &PgPool, sql: &str) -> Result<BTreeMap<String, u64>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (String, i64)>(sql)
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|(key, count)| (key, count as u64))
        .collect())
}

/// Materialize a full snapshot: aggregates, low-stock list and the catalog.
pub async fn snapshot(pool: &PgPool) -> Result<WarehouseSnapshot, sqlx::Error> {
    let stats = warehouse_stats(pool).await?;
    let low_stock = products::list_low_stock(pool)
        .await?
        .iter()
        .map(LowStockItem::from)
        .collect();
    let products = products::list_all(pool).await?;
    Ok(WarehouseSnapshot {
        products,
        ..WarehouseSnapshot::from_stats(stats, low_stock)
    })
}
