use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::query::ParseLabelError;

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// `PRD-####` identifier.
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock_level: i64,
    /// Stock at or below this level counts as low.
    pub reorder_point: i64,
    pub unit_price: f64,
    /// Storage bin, e.g. `A-01`.
    pub location: String,
    pub supplier: String,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock_level <= self.reorder_point
    }

    pub fn inventory_value(&self) -> f64 {
        self.stock_level as f64 * self.unit_price
    }
}

/// Shipment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    Pending,
    InTransit,
    Delivered,
    Delayed,
}

impl ShipmentStatus {
    pub const ALL: [ShipmentStatus; 4] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
        ShipmentStatus::Delayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Delayed => "delayed",
        }
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLabelError {
                kind: "shipment status",
                value: s.to_string(),
            })
    }
}

/// An inbound or outbound shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// `SHP-####` identifier.
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub status: ShipmentStatus,
    pub origin: String,
    pub destination: String,
    pub expected_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_date: Option<NaiveDate>,
}

/// A product whose stock is at or below its reorder point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub id: String,
    pub name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
}

impl From<&Product> for LowStockItem {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            current_stock: p.stock_level,
            reorder_point: p.reorder_point,
        }
    }
}

/// Aggregate warehouse statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseStats {
    pub total_products: u64,
    pub low_stock_products: u64,
    /// Sum of `stock_level * unit_price`, rounded to cents.
    pub total_inventory_value: f64,
    /// Category name → product count.
    pub categories: BTreeMap<String, u64>,
    /// Shipment status → shipment count.
    pub shipment_status: BTreeMap<String, u64>,
    /// Rounded to two decimals.
    pub average_stock_level: f64,
}

/// Read-only view of current warehouse state, materialized before a
/// context briefing is rendered.
///
/// Every field may be absent: a provider that could not compute one leaves
/// it `None` and consumers degrade instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSnapshot {
    pub total_products: Option<u64>,
    /// Low-stock products in provider order.
    pub low_stock: Option<Vec<LowStockItem>>,
    pub total_inventory_value: Option<f64>,
    pub average_stock_level: Option<f64>,
    pub categories: Option<BTreeMap<String, u64>>,
    pub shipment_status: Option<BTreeMap<String, u64>>,
    /// Products resolvable by id lookup (may be a subset of the catalog).
    #[serde(default)]
    pub products: Vec<Product>,
}

impl WarehouseSnapshot {
    /// Build a snapshot carrying every field of `stats`.
    pub fn from_stats(stats: WarehouseStats, low_stock: Vec<LowStockItem>) -> Self {
        Self {
            total_products: Some(stats.total_products),
            low_stock: Some(low_stock),
            total_inventory_value: Some(stats.total_inventory_value),
            average_stock_level: Some(stats.average_stock_level),
            categories: Some(stats.categories),
            shipment_status: Some(stats.shipment_status),
            products: Vec::new(),
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
