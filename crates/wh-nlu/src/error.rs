//! Query-understanding error types.

use thiserror::Error;

/// Errors raised while building a rule set.
///
/// Analysis itself never fails; only compiling a pattern table can.
#[derive(Debug, Error)]
pub enum NluError {
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("rule table is empty")]
    EmptyRuleTable,
}

/// Convenience alias for query-understanding results.
pub type NluResult<T> = Result<T, NluError>;
