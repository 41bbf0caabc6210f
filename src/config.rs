// ============================================================================
// File: src/config.rs
// Configuration structures and validation
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{FinderError, Result};

pub const TAVILY_API_KEY_VAR: &str = "TAVILY_API_KEY";
pub const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Depths accepted by the Tavily search API
pub const SEARCH_DEPTHS: [&str; 2] = ["basic", "advanced"];

/// Everything a running finder needs: two provider credentials and the
/// behavior settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the Tavily search API
    pub tavily_api_key: String,

    /// API key for the Groq chat completions API
    pub groq_api_key: String,

    /// Tunable pipeline behavior
    pub settings: FinderSettings,
}

/// Pipeline settings, loaded from an optional JSON file. Every field has a
/// default so an empty object `{}` is a complete configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FinderSettings {
    /// Base URL of the Tavily API
    pub tavily_url: String,

    /// Base URL of the OpenAI-compatible Groq API
    pub groq_url: String,

    /// Pinned model identifier sent with every completion request
    pub model: String,

    /// Sampling temperature (0.0-2.0). Kept low so the model sticks to JSON.
    pub temperature: f32,

    /// Maximum number of search results requested from the provider
    pub max_results: usize,

    /// Tavily search depth ("basic" or "advanced")
    pub search_depth: String,

    /// Per-result content budget in characters before the results enter the prompt
    pub content_char_limit: usize,

    /// HTTP timeout applied to both provider clients
    pub request_timeout_secs: u64,

    /// Brand named in the default extraction instructions
    pub brand_name: String,

    /// Queries that do not mention this keyword (case-insensitive) get scoped
    pub brand_keyword: String,

    /// Phrase prepended to queries lacking the brand keyword
    pub scoping_phrase: String,

    /// Replaces the built-in extraction instructions when set
    pub system_prompt: Option<String>,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            tavily_url: "https://api.tavily.com".to_string(),
            groq_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.2,
            max_results: 6,
            search_depth: "advanced".to_string(),
            content_char_limit: 1200,
            request_timeout_secs: 30,
            brand_name: "Tata Motors".to_string(),
            brand_keyword: "tata".to_string(),
            scoping_phrase: "Tata Motors dealer showroom".to_string(),
            system_prompt: None,
        }
    }
}

impl FinderSettings {
    /// Read settings from a JSON file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            FinderError::Config(format!(
                "failed to read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            FinderError::Config(format!(
                "failed to parse settings file {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Config {
    /// Load credentials from the process environment (after reading `.env`,
    /// if one exists) and combine them with `settings`.
    pub fn load(settings: FinderSettings) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(settings, |name| std::env::var(name).ok())
    }

    /// Build a configuration resolving credentials through `lookup`.
    pub fn from_lookup<F>(settings: FinderSettings, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            tavily_api_key: required_key(&lookup, TAVILY_API_KEY_VAR)?,
            groq_api_key: required_key(&lookup, GROQ_API_KEY_VAR)?,
            settings,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tavily_api_key.trim().is_empty() {
            return Err(missing_key(TAVILY_API_KEY_VAR));
        }

        if self.groq_api_key.trim().is_empty() {
            return Err(missing_key(GROQ_API_KEY_VAR));
        }

        let settings = &self.settings;

        if settings.model.trim().is_empty() {
            return Err(FinderError::Config("model identifier is required".to_string()));
        }

        if !(0.0..=2.0).contains(&settings.temperature) {
            return Err(FinderError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                settings.temperature
            )));
        }

        if !SEARCH_DEPTHS.contains(&settings.search_depth.as_str()) {
            return Err(FinderError::Config(format!(
                "search_depth must be one of {:?}, got {:?}",
                SEARCH_DEPTHS, settings.search_depth
            )));
        }

        if settings.max_results == 0 {
            return Err(FinderError::Config("max_results must be at least 1".to_string()));
        }

        if settings.content_char_limit == 0 {
            return Err(FinderError::Config(
                "content_char_limit must be at least 1".to_string(),
            ));
        }

        if settings.request_timeout_secs == 0 {
            return Err(FinderError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }

        if settings.brand_keyword.trim().is_empty() {
            return Err(FinderError::Config("brand_keyword must not be empty".to_string()));
        }

        Ok(())
    }
}

fn required_key<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| missing_key(name))
}

fn missing_key(name: &str) -> FinderError {
    FinderError::Config(format!("missing {} (set it in the environment or .env)", name))
}
