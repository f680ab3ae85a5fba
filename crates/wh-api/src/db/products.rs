//! Product catalog queries.

use sqlx::{PgExecutor, PgPool};
use wh_protocol::Product;

/// Product row returned from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock_level: i64,
    pub reorder_point: i64,
    pub unit_price: f64,
    pub location: String,
    pub supplier: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
            stock_level: row.stock_level,
            reorder_point: row.reorder_point,
            unit_price: row.unit_price,
            location: row.location,
            supplier: row.supplier,
        }
    }
}

/// List all products.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>("SELECT * FROM products ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

/// Products in one category, matched case-insensitively.
pub async fn list_by_category(pool: &PgPool, category: &str) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT * FROM products WHERE lower(category) = lower($1) ORDER BY id",
    )
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

/// Products at or below their reorder point.
pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT * FROM products WHERE stock_level <= reorder_point ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

/// Get a product by identifier, ignoring case.
pub async fn get_by_id(pool: &PgPool, id: &str) -> Result<Option<Product>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProductRow>("SELECT * FROM products WHERE id = upper($1)")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Product::from))
}

/// Number of products in the catalog.
pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await
}

/// Insert a new product.
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    product: &Product,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO products (id, name, category, stock_level, reorder_point, unit_price, location, supplier)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.category)
    .bind(product.stock_level)
    .bind(product.reorder_point)
    .bind(product.unit_price)
    .bind(&product.location)
    .bind(&product.supplier)
    .execute(executor)
    .await?;
    Ok(())
}
