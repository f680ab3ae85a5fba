//! Data snapshot abstraction: the synthesizer's only view of warehouse state.

use std::collections::BTreeMap;

use wh_protocol::{LowStockItem, Product, WarehouseSnapshot};

/// Read-only, already-materialized warehouse facts.
///
/// Every accessor may report absence; the synthesizer falls back to its
/// generic briefing rather than failing. Implementations must not fetch:
/// loading happens before rendering, in the caller.
pub trait DataSnapshot {
    fn total_products(&self) -> Option<u64>;

    /// Low-stock products in provider order.
    fn low_stock_products(&self) -> Option<&[LowStockItem]>;

    /// Category name → product count.
    fn category_counts(&self) -> Option<&BTreeMap<String, u64>>;

    /// Shipment status → shipment count.
    fn status_counts(&self) -> Option<&BTreeMap<String, u64>>;

    fn total_inventory_value(&self) -> Option<f64>;

    fn average_stock_level(&self) -> Option<f64>;

    /// Point lookup by `PRD-####` identifier.
    fn product(&self, id: &str) -> Option<&Product>;

    /// Products in one category, matched case-insensitively. A category
    /// missing from known counts has zero products.
    fn category_count(&self, category: &str) -> Option<u64> {
        self.category_counts().map(|counts| count_ignore_case(counts, category))
    }

    /// Shipments in one status, matched case-insensitively.
    fn status_count(&self, status: &str) -> Option<u64> {
        self.status_counts().map(|counts| count_ignore_case(counts, status))
    }
}

fn count_ignore_case(counts: &BTreeMap<String, u64>, key: &str) -> u64 {
    counts
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

impl DataSnapshot for WarehouseSnapshot {
    fn total_products(&self) -> Option<u64> {
        self.total_products
    }

    fn low_stock_products(&self) -> Option<&[LowStockItem]> {
        self.low_stock.as_deref()
    }

    fn category_counts(&self) -> Option<&BTreeMap<String, u64>> {
        self.categories.as_ref()
    }

    fn status_counts(&self) -> Option<&BTreeMap<String, u64>> {
        self.shipment_status.as_ref()
    }

    fn total_inventory_value(&self) -> Option<f64> {
        self.total_inventory_value
    }

    fn average_stock_level(&self) -> Option<f64> {
        self.average_stock_level
    }

    fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }
}
