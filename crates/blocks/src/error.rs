// ABOUTME: Error types for block model parsing.
// ABOUTME: Provides the BlockError enum used at the library edge; decorators themselves never fail.

use thiserror::Error;

/// Errors that can occur when reading authored block markup.
///
/// Decoration itself degrades tolerantly and has no error path; the only
/// hard failure is handing the model markup with no usable structure at all.
#[derive(Debug, Error)]
pub enum BlockError {
    /// The markup contains no element content to read rows from.
    #[error("block markup has no element content")]
    EmptyMarkup,
}
