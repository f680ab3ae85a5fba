//! In-memory inventory: the data provider used when no database is
//! configured, and the fixture behind most tests.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use wh_protocol::{
    Category, LowStockItem, Product, Shipment, ShipmentStatus, WarehouseSnapshot, WarehouseStats,
    round2,
};

const SAMPLE_PRODUCTS: usize = 50;
const SAMPLE_SHIPMENTS: usize = 30;

const LOCATIONS: [&str; 6] = ["A-01", "A-02", "B-01", "B-02", "C-01", "C-02"];
const ORIGINS: [&str; 3] = ["Warehouse A", "Warehouse B", "Supplier Hub"];
const DESTINATIONS: [&str; 4] = ["Store 1", "Store 2", "Customer Direct", "Distribution Center"];

/// Products and shipments held in memory.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
    shipments: Vec<Shipment>,
}

impl Inventory {
    pub fn new(products: Vec<Product>, shipments: Vec<Shipment>) -> Self {
        Self {
            products,
            shipments,
        }
    }

    /// A deterministic sample warehouse: 50 products spread evenly over
    /// the five categories and 30 shipments over the four statuses.
    pub fn with_sample_data() -> Self {
        let products = (1..=SAMPLE_PRODUCTS).map(sample_product).collect();
        let shipments = (1..=SAMPLE_SHIPMENTS).map(sample_shipment).collect();
        Self::new(products, shipments)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn shipments(&self) -> &[Shipment] {
        &self.shipments
    }

    /// Look up a product by id, ignoring case.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn products_in_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect()
    }

    pub fn shipments_with_status(&self, status: ShipmentStatus) -> Vec<&Shipment> {
        self.shipments.iter().filter(|s| s.status == status).collect()
    }

    /// Products at or below their reorder point, in catalog order.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    pub fn total_inventory_value(&self) -> f64 {
        self.products.iter().map(Product::inventory_value).sum()
    }

    pub fn stats(&self) -> WarehouseStats {
        let mut categories = BTreeMap::new();
        for product in &self.products {
            *categories.entry(product.category.clone()).or_insert(0) += 1;
        }

        let mut shipment_status = BTreeMap::new();
        for shipment in &self.shipments {
            *shipment_status
                .entry(shipment.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        let average_stock_level = if self.products.is_empty() {
            0.0
        } else {
            let total: i64 = self.products.iter().map(|p| p.stock_level).sum();
            round2(total as f64 / self.products.len() as f64)
        };

        WarehouseStats {
            total_products: self.products.len() as u64,
            low_stock_products: self.low_stock().len() as u64,
            total_inventory_value: round2(self.total_inventory_value()),
            categories,
            shipment_status,
            average_stock_level,
        }
    }

    /// Every aggregate plus the full product list for id lookups.
    pub fn snapshot(&self) -> WarehouseSnapshot {
        let low_stock = self.low_stock().into_iter().map(LowStockItem::from).collect();
        WarehouseSnapshot {
            products: self.products.clone(),
            ..WarehouseSnapshot::from_stats(self.stats(), low_stock)
        }
    }
}

fn sample_product(i: usize) -> Product {
    let category = Category::ALL[(i - 1) % Category::ALL.len()];
    Product {
        id: format!("PRD-{i:04}"),
        name: format!("Product {i}"),
        category: category.as_str().to_string(),
        stock_level: ((i * 131) % 301) as i64,
        reorder_point: (10 + (i * 13) % 41) as i64,
        unit_price: 10.0 + ((i * 7919) % 49_001) as f64 / 100.0,
        location: LOCATIONS[(i * 5) % LOCATIONS.len()].to_string(),
        supplier: supplier_for(category).to_string(),
    }
}

fn supplier_for(category: Category) -> &'static str {
    match category {
        Category::Electronics => "TechSupply Co",
        Category::Clothing => "Fashion World",
        Category::HomeAndGarden => "Garden Plus",
        Category::Sports => "SportMax",
        Category::Books => "BookDist",
    }
}

fn sample_shipment(i: usize) -> Shipment {
    let status = ShipmentStatus::ALL[i % ShipmentStatus::ALL.len()];
    let expected_date = sample_epoch() + Duration::days(((i * 7) % 41) as i64 - 10);
    let actual_date = (status == ShipmentStatus::Delivered)
        .then(|| expected_date + Duration::days((i % 8) as i64 - 2));
    Shipment {
        id: format!("SHP-{i:04}"),
        product_id: format!("PRD-{:04}", (i * 17) % SAMPLE_PRODUCTS + 1),
        quantity: (1 + (i * 37) % 100) as i64,
        status,
        origin: ORIGINS[i % ORIGINS.len()].to_string(),
        destination: DESTINATIONS[(i * 3) % DESTINATIONS.len()].to_string(),
        expected_date,
        actual_date,
    }
}

fn sample_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("sample epoch is a valid date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::DataSnapshot;

    fn sample() -> Inventory {
        Inventory::with_sample_data()
    }

    #[test]
    fn sample_data_sizes() {
        let inv = sample();
        assert_eq!(inv.products().len(), 50);
        assert_eq!(inv.shipments().len(), 30);
    }

    #[test]
    fn sample_ids_are_sequential() {
        let inv = sample();
        assert_eq!(inv.products()[0].id, "PRD-0001");
        assert_eq!(inv.products()[49].id, "PRD-0050");
        assert_eq!(inv.shipments()[29].id, "SHP-0030");
    }

    #[test]
    fn sample_data_is_deterministic() {
        assert_eq!(sample().products(), Inventory::with_sample_data().products());
        assert_eq!(sample().shipments(), Inventory::with_sample_data().shipments());
    }

    #[test]
    fn categories_evenly_spread() {
        let stats = sample().stats();
        assert_eq!(stats.categories.len(), 5);
        assert!(stats.categories.values().all(|&n| n == 10));
        assert_eq!(stats.categories.get("Home & Garden"), Some(&10));
    }

    #[test]
    fn shipment_statuses_cover_all() {
        let stats = sample().stats();
        assert_eq!(stats.shipment_status.values().sum::<u64>(), 30);
        assert_eq!(stats.shipment_status.get("in_transit"), Some(&8));
        assert_eq!(stats.shipment_status.get("delayed"), Some(&7));
    }

    #[test]
    fn only_delivered_shipments_have_actual_dates() {
        for shipment in sample().shipments() {
            assert_eq!(
                shipment.actual_date.is_some(),
                shipment.status == ShipmentStatus::Delivered,
                "{}",
                shipment.id
            );
        }
    }

    #[test]
    fn shipments_reference_known_products() {
        let inv = sample();
        for shipment in inv.shipments() {
            assert!(inv.product(&shipment.product_id).is_some(), "{}", shipment.product_id);
        }
    }

    #[test]
    fn low_stock_matches_predicate() {
        let inv = sample();
        let low = inv.low_stock();
        assert_eq!(low.len(), 7);
        assert!(low.iter().all(|p| p.stock_level <= p.reorder_point));
        assert_eq!(low[0].id, "PRD-0007");
        assert_eq!(inv.stats().low_stock_products, 7);
    }

    #[test]
    fn prices_within_range() {
        for p in sample().products() {
            assert!((10.0..=500.0).contains(&p.unit_price), "{}", p.unit_price);
        }
    }

    #[test]
    fn stats_aggregate_consistently() {
        let inv = sample();
        let stats = inv.stats();
        assert_eq!(stats.total_products, 50);
        assert_eq!(stats.total_inventory_value, round2(inv.total_inventory_value()));
        assert_eq!(stats.average_stock_level, 149.9);
    }

    #[test]
    fn lookups_ignore_case() {
        let inv = sample();
        assert_eq!(inv.product("prd-0010").map(|p| p.id.as_str()), Some("PRD-0010"));
        assert_eq!(inv.products_in_category("books").len(), 10);
        assert!(inv.product("PRD-9999").is_none());
    }

    #[test]
    fn shipments_filter_by_status() {
        let inv = sample();
        let delivered = inv.shipments_with_status(ShipmentStatus::Delivered);
        assert_eq!(delivered.len(), 8);
        assert!(delivered.iter().all(|s| s.status == ShipmentStatus::Delivered));
    }

    #[test]
    fn empty_inventory_stats() {
        let stats = Inventory::default().stats();
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.average_stock_level, 0.0);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn snapshot_carries_everything() {
        let snapshot = sample().snapshot();
        assert_eq!(snapshot.total_products(), Some(50));
        assert_eq!(snapshot.low_stock_products().map(<[_]>::len), Some(7));
        assert_eq!(snapshot.category_count("Sports"), Some(10));
        assert!(snapshot.product("PRD-0042").is_some());
    }
}
