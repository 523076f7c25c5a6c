// ABOUTME: Error types for the importer library edge.
// ABOUTME: Extraction itself degrades tolerantly; only rule deserialization can fail.

use thiserror::Error;

/// Errors that can occur loading parser rules.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The rule JSON could not be deserialized.
    #[error("failed to parse rules: {0}")]
    Rules(String),
}

impl ImportError {
    /// Creates a Rules error from an underlying serde error.
    pub fn rules(err: impl std::fmt::Display) -> Self {
        ImportError::Rules(err.to_string())
    }
}
