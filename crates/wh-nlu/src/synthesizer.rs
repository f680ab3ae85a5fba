//! Context synthesis: render a query analysis plus live warehouse facts
//! into the briefing handed to the language model.
//!
//! Rendering is a pure read over a [`DataSnapshot`]. A missing entity or a
//! snapshot field the provider could not supply never fails the request:
//! the affected branch is skipped and only the generic preamble and the
//! closing instruction remain.

use std::fmt::Write as _;

use serde::Deserialize;
use wh_protocol::{Entities, Intent, QueryAnalysis};

use crate::snapshot::DataSnapshot;

const PREAMBLE: &str = "You are an intelligent warehouse management assistant. ";

const CLOSING: &str = "Provide helpful, accurate information based on the warehouse data \
and respond in a professional but friendly manner.";

/// Low-stock items listed by name; the rest are only counted.
const LOW_STOCK_LISTED: usize = 5;

/// How much surrounding detail the briefing carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BriefingStyle {
    /// One paragraph with the facts relevant to the intent.
    #[default]
    Compact,
    /// System-status block, detected intent/entities, then intent details.
    Detailed,
}

impl std::str::FromStr for BriefingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "detailed" => Ok(Self::Detailed),
            other => Err(format!("unknown briefing style '{other}'")),
        }
    }
}

/// Render a briefing in the given style.
pub fn render(style: BriefingStyle, analysis: &QueryAnalysis, data: &dyn DataSnapshot) -> String {
    match style {
        BriefingStyle::Compact => synthesize(analysis, data),
        BriefingStyle::Detailed => synthesize_detailed(analysis, data),
    }
}

/// Compact briefing: preamble, intent-specific facts, closing instruction.
pub fn synthesize(analysis: &QueryAnalysis, data: &dyn DataSnapshot) -> String {
    let mut context = String::from(PREAMBLE);
    if let Some(facts) = intent_facts(analysis.intent, &analysis.entities, data) {
        context.push_str(&facts);
    }
    context.push_str(CLOSING);
    context
}

/// The intent-specific sentence(s), or `None` when the intent carries no
/// facts or the facts it needs are unavailable.
fn intent_facts(intent: Intent, entities: &Entities, data: &dyn DataSnapshot) -> Option<String> {
    match intent {
        Intent::InventoryStatus => {
            let product = data.product(entities.product_id.as_deref()?)?;
            Some(format!(
                "The user is asking about product {} (ID: {}). Current stock: {}, \
                 Location: {}, Category: {}, Reorder point: {}. ",
                product.name,
                product.id,
                product.stock_level,
                product.location,
                product.category,
                product.reorder_point,
            ))
        }
        Intent::LowStock => {
            let low_stock = data.low_stock_products()?;
            let mut facts = format!(
                "There are currently {} products with low stock levels. ",
                low_stock.len()
            );
            if !low_stock.is_empty() {
                let listed: Vec<String> = low_stock
                    .iter()
                    .take(LOW_STOCK_LISTED)
                    .map(|item| format!("{} ({} units)", item.name, item.current_stock))
                    .collect();
                let _ = write!(facts, "Low stock products: {}. ", listed.join(", "));
            }
            Some(facts)
        }
        Intent::WarehouseStats => {
            let total = data.total_products()?;
            let low = data.low_stock_products()?.len();
            let value = data.total_inventory_value()?;
            let average = data.average_stock_level()?;
            Some(format!(
                "Current warehouse statistics: {total} total products, {low} low stock items, \
                 total inventory value: ${value:.2}, average stock level: {average}. "
            ))
        }
        Intent::CategoryQuery => {
            let category = entities.category?;
            let count = data.category_count(category.as_str())?;
            Some(format!("Found {count} products in {category} category. "))
        }
        Intent::ShipmentStatus => {
            let status = entities.status.as_deref()?;
            let count = data.status_count(status)?;
            Some(format!("There are {count} shipments with {status} status. "))
        }
        Intent::ProductInfo
        | Intent::ReorderSuggestions
        | Intent::GeneralHelp
        | Intent::Unknown => None,
    }
}

/// Detailed briefing: a status block built from whatever aggregates the
/// snapshot carries, the analysis itself, then per-intent detail.
pub fn synthesize_detailed(analysis: &QueryAnalysis, data: &dyn DataSnapshot) -> String {
    let mut context = String::from(
        "You are an AI assistant for a warehouse management system. \
         You have access to real-time data from the warehouse database.\n\n\
         Current System Status:\n",
    );

    if let Some(total) = data.total_products() {
        let _ = writeln!(context, "- Total Products: {total}");
    }
    if let Some(low_stock) = data.low_stock_products() {
        let _ = writeln!(context, "- Low Stock Products: {}", low_stock.len());
    }
    if let Some(value) = data.total_inventory_value() {
        let _ = writeln!(context, "- Total Inventory Value: ${value:.2}");
    }
    if let Some(categories) = data.category_counts() {
        let names: Vec<&str> = categories.keys().map(String::as_str).collect();
        let _ = writeln!(context, "- Product Categories: {}", names.join(", "));
    }
    if let Some(average) = data.average_stock_level() {
        let _ = writeln!(context, "- Average Stock Level: {average:.1} units");
    }

    let _ = write!(
        context,
        "\nQuery Intent: {}\nDetected Entities: {}\n\n",
        analysis.intent,
        describe_entities(&analysis.entities)
    );

    context.push_str(
        "You should provide helpful, accurate responses about:\n\
         - Products and inventory management\n\
         - Stock levels and reorder alerts\n\
         - Shipment status and delivery tracking\n\
         - Product categories and pricing\n\
         - Warehouse operations\n\n\
         Be conversational, helpful, and use the real data provided to give accurate information.",
    );

    match analysis.intent {
        Intent::LowStock => {
            if let Some(low_stock) = data.low_stock_products().filter(|l| !l.is_empty()) {
                let _ = writeln!(
                    context,
                    "\n\nCurrent Low Stock Items ({} total):",
                    low_stock.len()
                );
                for item in low_stock.iter().take(LOW_STOCK_LISTED) {
                    let _ = writeln!(
                        context,
                        "- {}: {} units (reorder at {})",
                        item.name, item.current_stock, item.reorder_point
                    );
                }
            }
        }
        Intent::InventoryStatus => {
            if let Some(categories) = data.category_counts() {
                context.push_str("\n\nInventory Summary:\n");
                for (category, count) in categories {
                    let _ = writeln!(context, "- {category}: {count} products");
                }
            }
        }
        Intent::ShipmentStatus
        | Intent::ProductInfo
        | Intent::WarehouseStats
        | Intent::CategoryQuery
        | Intent::ReorderSuggestions
        | Intent::GeneralHelp
        | Intent::Unknown => {}
    }

    context
}

/// `key: value` pairs for the entities present, or `none`.
fn describe_entities(entities: &Entities) -> String {
    let mut parts = Vec::new();
    if let Some(id) = &entities.product_id {
        parts.push(format!("product_id: {id}"));
    }
    if let Some(id) = &entities.shipment_id {
        parts.push(format!("shipment_id: {id}"));
    }
    if let Some(category) = entities.category {
        parts.push(format!("category: {category}"));
    }
    if let Some(status) = &entities.status {
        parts.push(format!("status: {status}"));
    }
    if let Some(numbers) = &entities.numbers {
        parts.push(format!("numbers: {numbers:?}"));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}
