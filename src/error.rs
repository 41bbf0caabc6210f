// ============================================================================
// File: src/error.rs
// Error types for the dealer lookup pipeline
// ============================================================================

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

/// Failures that abort a lookup. Malformed search responses and unparseable
/// model output are not errors; they degrade inside the pipeline.
#[derive(Debug, Error)]
pub enum FinderError {
    /// Missing credentials or invalid settings. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport or provider failure while calling the search API.
    #[error("search request failed: {0}")]
    Search(String),

    /// Transport or provider failure while calling the language model.
    #[error("model request failed: {0}")]
    Model(String),
}
