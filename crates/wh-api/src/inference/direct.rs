//! Deterministic answers composed straight from warehouse data.
//!
//! Only statistics and low-stock questions are answered here. The query
//! route sends every other intent to the language model.

use std::fmt::Write as _;

use wh_protocol::{LowStockItem, WarehouseStats};

/// Low-stock items named in a direct answer.
const LISTED_ITEMS: usize = 5;

/// Overview sentence for a statistics question.
pub fn stats_answer(stats: &WarehouseStats) -> String {
    let mut answer = format!(
        "Here's your warehouse overview: {} products across {} categories, \
         {} with low stock, total inventory value ${:.2}, average stock level {:.2} units.",
        stats.total_products,
        stats.categories.len(),
        stats.low_stock_products,
        stats.total_inventory_value,
        stats.average_stock_level,
    );
    if !stats.shipment_status.is_empty() {
        let shipments: Vec<String> = stats
            .shipment_status
            .iter()
            .map(|(status, count)| format!("{count} {status}"))
            .collect();
        let _ = write!(answer, " Shipments: {}.", shipments.join(", "));
    }
    answer
}

/// Alert sentence for a low-stock question.
pub fn low_stock_answer(items: &[LowStockItem]) -> String {
    let mut answer = format!("Low stock alert: {} products need attention.", items.len());
    if !items.is_empty() {
        let listed: Vec<String> = items
            .iter()
            .take(LISTED_ITEMS)
            .map(|item| {
                format!(
                    "{} ({}, {} units, reorder at {})",
                    item.name, item.id, item.current_stock, item.reorder_point
                )
            })
            .collect();
        let _ = write!(answer, " {}", listed.join("; "));
        if items.len() > LISTED_ITEMS {
            let _ = write!(answer, "; and {} more", items.len() - LISTED_ITEMS);
        }
        answer.push('.');
    }
    answer
}
