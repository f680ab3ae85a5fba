//! Query understanding for the warehouse assistant.
//!
//! Classifies a free-text question into one of a closed set of intents,
//! pulls out identifiers, categories, statuses and numbers, scores the
//! match, and renders a fact-grounded briefing for the language model
//! from a `DataSnapshot`. Also carries the in-memory `Inventory` used when
//! no database is configured.

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod inventory;
pub mod processor;
pub mod rules;
pub mod snapshot;
pub mod synthesizer;

// Re-export key types for convenience
pub use classifier::IntentClassifier;
pub use error::{NluError, NluResult};
pub use extractor::{EntityExtractor, score_confidence};
pub use inventory::Inventory;
pub use processor::QueryProcessor;
pub use rules::IntentRule;
pub use snapshot::DataSnapshot;
pub use synthesizer::{BriefingStyle, render, synthesize, synthesize_detailed};
