//! Ordered, first-match-wins intent classification.

use regex::Regex;
use wh_protocol::Intent;

use crate::error::{NluError, NluResult};
use crate::rules::{INTENT_RULES, IntentRule, compile_pattern};

/// A rule with its patterns compiled.
#[derive(Debug, Clone)]
struct CompiledRule {
    intent: Intent,
    patterns: Vec<Regex>,
}

/// Maps query text to exactly one [`Intent`].
///
/// Rules are tried in table order and the first rule with any matching
/// pattern wins, so a query mentioning both "low stock" and "warehouse
/// report" resolves to whichever rule is declared first.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<CompiledRule>,
}

impl IntentClassifier {
    /// Compile a rule table.
    pub fn new(table: &[IntentRule]) -> NluResult<Self> {
        if table.is_empty() {
            return Err(NluError::EmptyRuleTable);
        }
        let rules = table
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| compile_pattern(p))
                    .collect::<NluResult<Vec<_>>>()?;
                Ok(CompiledRule {
                    intent: rule.intent,
                    patterns,
                })
            })
            .collect::<NluResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Classify text. Anything no rule matches, including the empty
    /// string, is [`Intent::Unknown`].
    pub fn classify(&self, text: &str) -> Intent {
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|re| re.is_match(text)))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::Unknown)
    }

    /// Compiled patterns for an intent, if the table has a rule for it.
    pub fn patterns_for(&self, intent: Intent) -> Option<&[Regex]> {
        self.rules
            .iter()
            .find(|rule| rule.intent == intent)
            .map(|rule| rule.patterns.as_slice())
    }

    /// Classifier over the built-in [`INTENT_RULES`].
    pub fn standard() -> Self {
        Self::new(INTENT_RULES).expect("built-in intent rules compile")
    }
}
