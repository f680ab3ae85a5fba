//! Static rule tables: plain data, compiled once into a [`QueryProcessor`].
//!
//! Declaration order is load-bearing everywhere in this module:
//! intent rules are evaluated first-match-wins, and the first category
//! synonym or status keyword found in the text is the one kept.
//!
//! [`QueryProcessor`]: crate::QueryProcessor

use regex::{Regex, RegexBuilder};
use wh_protocol::{Category, Intent};

use crate::error::{NluError, NluResult};

/// One intent and the patterns that select it.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub patterns: &'static [&'static str],
}

/// Intent rules in evaluation order.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::InventoryStatus,
        patterns: &[
            r"inventory|stock level|how much.*stock|stock status",
            r"how many.*in stock|available.*quantity",
            r"check.*inventory|inventory.*report",
        ],
    },
    IntentRule {
        intent: Intent::LowStock,
        patterns: &[
            r"low stock|running low|need.*reorder|below.*reorder",
            r"stock alert|inventory alert|critical.*stock",
            r"need.*replenish|urgent.*stock",
        ],
    },
    IntentRule {
        intent: Intent::ShipmentStatus,
        patterns: &[
            r"shipment|shipping|delivery|ship.*status",
            r"track.*order|order.*status|delivery.*status",
            r"when.*arrive|expected.*delivery",
        ],
    },
    IntentRule {
        intent: Intent::ProductInfo,
        patterns: &[
            r"product.*detail|info.*product|tell me about",
            r"price.*product|cost.*item|product.*price",
            r"where.*located|location.*product",
        ],
    },
    IntentRule {
        intent: Intent::WarehouseStats,
        patterns: &[
            r"warehouse.*report|overall.*status|summary",
            r"statistics|stats|performance|overview",
            r"total.*value|inventory.*value|worth",
        ],
    },
    IntentRule {
        intent: Intent::CategoryQuery,
        patterns: &[
            r"category|type.*product|products.*in.*category",
            r"electronics|clothing|books|sports|home.*garden",
            r"what.*categories|list.*categories",
        ],
    },
    IntentRule {
        intent: Intent::ReorderSuggestions,
        patterns: &[
            r"reorder|replenish|order.*more|need.*order",
            r"suggestion.*restock|recommend.*order",
            r"what.*should.*order",
        ],
    },
    IntentRule {
        intent: Intent::GeneralHelp,
        patterns: &[
            r"help|what.*can.*do|commands|options",
            r"how.*use|guide|assistance",
        ],
    },
];

/// Substring → canonical category, scanned in order.
pub const CATEGORY_SYNONYMS: &[(&str, Category)] = &[
    ("electronics", Category::Electronics),
    ("clothing", Category::Clothing),
    ("fashion", Category::Clothing),
    ("books", Category::Books),
    ("sports", Category::Sports),
    ("home", Category::HomeAndGarden),
    ("garden", Category::HomeAndGarden),
];

/// Status keywords, scanned in order.
pub const STATUS_KEYWORDS: &[&str] = &[
    "pending",
    "in_transit",
    "delivered",
    "delayed",
    "urgent",
    "critical",
];

/// Product identifier; the hyphen is optional on input.
pub const PRODUCT_ID_PATTERN: &str = r"prd-?([0-9]{4})";

/// Shipment identifier; the hyphen is optional on input.
pub const SHIPMENT_ID_PATTERN: &str = r"shp-?([0-9]{4})";

/// Integer literal. ASCII digits only, so every match parses.
pub const NUMBER_PATTERN: &str = r"[0-9]+";

/// Compile one pattern case-insensitively.
pub(crate) fn compile_pattern(pattern: &str) -> NluResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| NluError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        for rule in INTENT_RULES {
            for pattern in rule.patterns {
                assert!(compile_pattern(pattern).is_ok(), "{pattern} should compile");
            }
        }
        for pattern in [PRODUCT_ID_PATTERN, SHIPMENT_ID_PATTERN, NUMBER_PATTERN] {
            assert!(compile_pattern(pattern).is_ok());
        }
    }

    #[test]
    fn rules_cover_every_intent_but_unknown_once() {
        let intents: Vec<Intent> = INTENT_RULES.iter().map(|r| r.intent).collect();
        let expected: Vec<Intent> = Intent::ALL
            .into_iter()
            .filter(|i| *i != Intent::Unknown)
            .collect();
        assert_eq!(intents, expected);
    }

    #[test]
    fn synonyms_map_onto_every_category() {
        for category in Category::ALL {
            assert!(
                CATEGORY_SYNONYMS.iter().any(|(_, c)| *c == category),
                "{category} has no synonym"
            );
        }
    }

    #[test]
    fn invalid_pattern_reports_source() {
        let err = compile_pattern("stock(").unwrap_err();
        assert!(err.to_string().contains("stock("));
    }
}
