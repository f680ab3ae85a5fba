//! Shipment queries.

use chrono::NaiveDate;
use sqlx::{PgExecutor, PgPool};
use wh_protocol::{Shipment, ShipmentStatus};

/// Shipment row returned from the database.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShipmentRow {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub status: String,
    pub origin: String,
    pub destination: String,
    pub expected_date: NaiveDate,
    pub actual_date: Option<NaiveDate>,
}

impl TryFrom<ShipmentRow> for Shipment {
    type Error = sqlx::Error;

    fn try_from(row: ShipmentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ShipmentStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Self {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            status,
            origin: row.origin,
            destination: row.destination,
            expected_date: row.expected_date,
            actual_date: row.actual_date,
        })
    }
}

/// List all shipments.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Shipment>, sqlx::Error> {
    sqlx::query_as::<_, ShipmentRow>("SELECT * FROM shipments ORDER BY id")
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Shipment::try_from)
        .collect()
}

/// Shipments in one status.
pub async fn list_by_status(
    pool: &PgPool,
    status: ShipmentStatus,
) -> Result<Vec<Shipment>, sqlx::Error> {
    sqlx::query_as::<_, ShipmentRow>("SELECT * FROM shipments WHERE status = $1 ORDER BY id")
        .bind(status.as_str())
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Shipment::try_from)
        .collect()
}

/// Insert a new shipment.
pub async fn insert<'e>(
    executor: impl PgExecutor<'e>,
    shipment: &Shipment,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO shipments (id, product_id, quantity, status, origin, destination, expected_date, actual_date)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&shipment.id)
    .bind(&shipment.product_id)
    .bind(shipment.quantity)
    .bind(shipment.status.as_str())
    .bind(&shipment.origin)
    .bind(&shipment.destination)
    .bind(shipment.expected_date)
    .bind(shipment.actual_date)
    .execute(executor)
    .await?;
    Ok(())
}
