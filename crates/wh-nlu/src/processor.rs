//! The analysis entry point: classify, extract, score.

use wh_protocol::{Entities, Intent, QueryAnalysis};

use crate::classifier::IntentClassifier;
use crate::error::NluResult;
use crate::extractor::{EntityExtractor, score_confidence};
use crate::rules::{INTENT_RULES, IntentRule};

/// Immutable query-understanding pipeline.
///
/// Build once at startup and share by reference (`Arc`) across requests;
/// every method is a pure function of its input and the compiled tables.
#[derive(Debug, Clone)]
pub struct QueryProcessor {
    classifier: IntentClassifier,
    extractor: EntityExtractor,
}

impl QueryProcessor {
    /// Compile a processor over a custom intent table.
    pub fn with_rules(table: &[IntentRule]) -> NluResult<Self> {
        Ok(Self {
            classifier: IntentClassifier::new(table)?,
            extractor: EntityExtractor::new()?,
        })
    }

    /// Processor over the built-in tables.
    pub fn new() -> NluResult<Self> {
        Self::with_rules(INTENT_RULES)
    }

    /// Processor over the built-in tables, for contexts that cannot
    /// propagate a construction error.
    pub fn standard() -> Self {
        Self {
            classifier: IntentClassifier::standard(),
            extractor: EntityExtractor::standard(),
        }
    }

    /// Lower-case and trim query text.
    pub fn normalize(text: &str) -> String {
        text.to_lowercase().trim().to_string()
    }

    /// Full analysis of one query.
    pub fn analyze(&self, text: &str) -> QueryAnalysis {
        let query = Self::normalize(text);
        let intent = self.classifier.classify(&query);
        let entities = self.extractor.extract(&query);
        let confidence = score_confidence(&self.classifier, &query, intent);

        tracing::debug!(
            intent = %intent,
            confidence,
            entities = ?entities,
            "query analyzed"
        );

        QueryAnalysis {
            intent,
            entities,
            original_query: query,
            confidence,
        }
    }

    /// Intent only.
    pub fn classify(&self, text: &str) -> Intent {
        self.classifier.classify(&Self::normalize(text))
    }

    /// Entities and the confidence of `intent` for this text.
    pub fn extract(&self, text: &str, intent: Intent) -> (Entities, f64) {
        let query = Self::normalize(text);
        let entities = self.extractor.extract(&query);
        let confidence = score_confidence(&self.classifier, &query, intent);
        (entities, confidence)
    }
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self::standard()
    }
}
