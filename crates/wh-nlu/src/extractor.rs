//! Entity extraction and confidence scoring.
//!
//! Every detector runs on every query. The detected intent only feeds the
//! confidence score; which entities matter for an intent is decided later,
//! by the synthesizer.

use regex::Regex;
use wh_protocol::{Entities, Intent};

use crate::classifier::IntentClassifier;
use crate::error::NluResult;
use crate::rules::{
    CATEGORY_SYNONYMS, NUMBER_PATTERN, PRODUCT_ID_PATTERN, SHIPMENT_ID_PATTERN, STATUS_KEYWORDS,
    compile_pattern,
};

/// Confidence for an intent whose patterns matched once.
const BASE_CONFIDENCE: f64 = 0.6;
/// Added per pattern hit.
const CONFIDENCE_PER_HIT: f64 = 0.3;
/// Upper bound; a heuristic score is never certain.
const MAX_CONFIDENCE: f64 = 0.9;
/// Score when the intent matched but no pattern hit could be counted.
const UNCOUNTED_CONFIDENCE: f64 = 0.5;

/// Scans query text for identifiers, categories, statuses and numbers.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    product_id: Regex,
    shipment_id: Regex,
    number: Regex,
}

impl EntityExtractor {
    pub fn new() -> NluResult<Self> {
        Ok(Self {
            product_id: compile_pattern(PRODUCT_ID_PATTERN)?,
            shipment_id: compile_pattern(SHIPMENT_ID_PATTERN)?,
            number: compile_pattern(NUMBER_PATTERN)?,
        })
    }

    /// Extractor over the built-in patterns.
    pub fn standard() -> Self {
        Self::new().expect("built-in entity patterns compile")
    }

    /// Run every detector over already-normalized text.
    pub fn extract(&self, text: &str) -> Entities {
        Entities {
            product_id: first_id(&self.product_id, text, "PRD"),
            shipment_id: first_id(&self.shipment_id, text, "SHP"),
            category: CATEGORY_SYNONYMS
                .iter()
                .find(|(key, _)| text.contains(key))
                .map(|(_, category)| *category),
            status: STATUS_KEYWORDS
                .iter()
                .find(|keyword| text.contains(*keyword))
                .map(|keyword| (*keyword).to_string()),
            numbers: self.numbers(text),
        }
    }

    /// Digit runs wider than `u128` (over 39 digits) are skipped.
    fn numbers(&self, text: &str) -> Option<Vec<u128>> {
        let numbers: Vec<u128> = self
            .number
            .find_iter(text)
            .filter_map(|m| match m.as_str().parse::<u128>() {
                Ok(n) => Some(n),
                Err(e) => {
                    tracing::debug!(literal = m.as_str(), error = %e, "skipping oversized number");
                    None
                }
            })
            .collect();
        (!numbers.is_empty()).then_some(numbers)
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::standard()
    }
}

/// First identifier match, normalized to `PREFIX-####`.
fn first_id(re: &Regex, text: &str, prefix: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|digits| format!("{prefix}-{}", digits.as_str()))
}

/// Score how strongly `intent`'s patterns recur in `text`.
///
/// Takes the highest non-overlapping match count of any single pattern of
/// the intent's rule: `min(0.9, 0.6 + 0.3 * hits)`. `Unknown` scores 0.0.
///
/// The 0.5 branch can only be reached when the intent was chosen by a
/// different pattern set than the one counted here. Kept for
/// compatibility with existing consumers of the score.
pub fn score_confidence(classifier: &IntentClassifier, text: &str, intent: Intent) -> f64 {
    if intent == Intent::Unknown {
        return 0.0;
    }
    let max_matches = classifier
        .patterns_for(intent)
        .unwrap_or_default()
        .iter()
        .map(|re| re.find_iter(text).count())
        .max()
        .unwrap_or(0);

    if max_matches > 0 {
        (max_matches as f64 * CONFIDENCE_PER_HIT + BASE_CONFIDENCE).min(MAX_CONFIDENCE)
    } else {
        UNCOUNTED_CONFIDENCE
    }
}
