use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discrete need a free-text query expresses.
///
/// Closed set: every consumer matches on it exhaustively, so adding a
/// variant forces the synthesizer and the API layer to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    InventoryStatus,
    LowStock,
    ShipmentStatus,
    ProductInfo,
    WarehouseStats,
    CategoryQuery,
    ReorderSuggestions,
    GeneralHelp,
    Unknown,
}

impl Intent {
    /// Every intent, `Unknown` last.
    pub const ALL: [Intent; 9] = [
        Intent::InventoryStatus,
        Intent::LowStock,
        Intent::ShipmentStatus,
        Intent::ProductInfo,
        Intent::WarehouseStats,
        Intent::CategoryQuery,
        Intent::ReorderSuggestions,
        Intent::GeneralHelp,
        Intent::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InventoryStatus => "inventory_status",
            Self::LowStock => "low_stock",
            Self::ShipmentStatus => "shipment_status",
            Self::ProductInfo => "product_info",
            Self::WarehouseStats => "warehouse_stats",
            Self::CategoryQuery => "category_query",
            Self::ReorderSuggestions => "reorder_suggestions",
            Self::GeneralHelp => "general_help",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized enum label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: '{value}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Intent {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| ParseLabelError {
                kind: "intent",
                value: s.to_string(),
            })
    }
}

/// Canonical product category recognized in query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    Sports,
    Books,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Clothing,
        Category::HomeAndGarden,
        Category::Sports,
        Category::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::Clothing => "Clothing",
            Self::HomeAndGarden => "Home & Garden",
            Self::Sports => "Sports",
            Self::Books => "Books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured fragments pulled out of a query.
///
/// Absent detectors leave their key out of the serialized map entirely;
/// `numbers` is never serialized as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entities {
    /// Normalized `PRD-####` identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Normalized `SHP-####` identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// One of `pending`, `in_transit`, `delivered`, `delayed`, `urgent`, `critical`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Every integer literal, in order of appearance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbers: Option<Vec<u128>>,
}

impl Entities {
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.shipment_id.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.numbers.is_none()
    }
}

/// Result of analyzing one query. Built fresh per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    pub intent: Intent,
    pub entities: Entities,
    /// Lower-cased, trimmed query text.
    pub original_query: String,
    /// Heuristic score in `[0.0, 0.9]`.
    pub confidence: f64,
}
