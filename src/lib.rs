// ============================================================================
// File: src/lib.rs
// Dealer lookup pipeline: web search plus LLM extraction
// ============================================================================

pub mod config;
pub mod display;
pub mod error;
pub mod extractor;
pub mod llm_client;
pub mod markdown;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod query;
pub mod search_client;

#[cfg(test)]
mod test_support;

pub use config::{Config, FinderSettings};
pub use error::{FinderError, Result};
pub use models::{Answer, Confidence, DealerRecord, FallbackAnswer, SearchResult, StructuredAnswer};
pub use orchestrator::DealerFinder;
