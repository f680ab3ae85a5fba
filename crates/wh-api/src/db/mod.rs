//! Database access layer for PostgreSQL.
//!
//! Each sub-module provides typed query functions over a `PgPool`.

pub mod products;
pub mod shipments;
pub mod stats;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use wh_nlu::Inventory;

/// Connect to PostgreSQL and run migrations.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::raw_sql(include_str!("../../migrations/001_products.sql"))
        .execute(&pool)
        .await?;
    sqlx::raw_sql(include_str!("../../migrations/002_shipments.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("migrations complete");

    Ok(pool)
}

/// Load `inventory` into empty tables. Returns whether anything was written.
pub async fn seed_if_empty(pool: &PgPool, inventory: &Inventory) -> Result<bool, sqlx::Error> {
    if products::count(pool).await? > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    for product in inventory.products() {
        products::insert(&mut *tx, product).await?;
    }
    for shipment in inventory.shipments() {
        shipments::insert(&mut *tx, shipment).await?;
    }
    tx.commit().await?;

    tracing::info!(
        products = inventory.products().len(),
        shipments = inventory.shipments().len(),
        "seeded sample data"
    );
    Ok(true)
}
