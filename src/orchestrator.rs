// ============================================================================
// File: src/orchestrator.rs
// Query-to-answer pipeline
// ============================================================================

use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::{Config, FinderSettings};
use crate::error::Result;
use crate::extractor::Extractor;
use crate::llm_client::{ChatModel, GroqClient};
use crate::models::Answer;
use crate::query::QueryNormalizer;
use crate::search_client::{SearchProvider, TavilyClient};

/// Runs one lookup per call: normalize, search, extract. Holds no per-request
/// state, so a single finder can serve any number of sequential queries.
pub struct DealerFinder {
    normalizer: QueryNormalizer,
    search: Arc<dyn SearchProvider>,
    extractor: Extractor,
    max_results: usize,
}

impl DealerFinder {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        model: Arc<dyn ChatModel>,
        settings: FinderSettings,
    ) -> Self {
        Self {
            normalizer: QueryNormalizer::from_settings(&settings),
            search,
            max_results: settings.max_results,
            extractor: Extractor::new(model, settings),
        }
    }

    /// Wire the production Tavily and Groq clients from a validated config.
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let search = TavilyClient::new(config.tavily_api_key, &config.settings)?;
        let model = GroqClient::new(config.groq_api_key, &config.settings)?;
        Ok(Self::new(Arc::new(search), Arc::new(model), config.settings))
    }

    /// Answer a free-text dealer query.
    pub async fn answer(&self, user_query: &str) -> Result<Answer> {
        let start = Instant::now();

        let search_query = self.normalizer.normalize(user_query);
        info!(query = user_query, search_query = %search_query, "looking up dealers");

        let results = self.search.search(&search_query, self.max_results).await?;
        info!(results = results.len(), "search complete");

        // The model sees the user's own wording, not the scoped search query.
        let answer = self.extractor.extract(user_query, &results).await?;
        info!(
            mode = answer.mode(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lookup complete"
        );

        Ok(answer)
    }
}
