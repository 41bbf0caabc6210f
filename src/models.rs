// ============================================================================
// File: src/models.rs
// API request/response models and answer records
// ============================================================================

use serde::{Deserialize, Serialize};

/// Message structure for a chat completion request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Message {
    pub role: String, // "system" or "user"
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request structure for the chat completions API
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
}

/// Response structure from the chat completions API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

/// Individual response choice
#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Message in API response
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Request body for the Tavily search API
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub search_depth: String,
    pub max_results: usize,
    pub include_answer: bool,
    pub include_raw_content: bool,
}

/// Individual search result, in provider ranking order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub content: String,
}

/// How sure the model is that a record describes a real, matching dealer
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    /// Case-insensitive match against the three accepted labels.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// One dealership location extracted from the search results
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct DealerRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hours: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub website: Option<String>,
    pub confidence: Confidence,
}

/// A source that was offered to the model
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SourceRef {
    pub title: Option<String>,
    pub url: String,
}

/// Model output that parsed as structured data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StructuredAnswer {
    pub dealers: Vec<DealerRecord>,
    pub follow_up_question: Option<String>,
    /// Every offered source with a url, not only the ones the model cited
    pub sources_used: Vec<SourceRef>,
}

/// Raw model text kept when it could not be parsed
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FallbackAnswer {
    pub query: String,
    pub response: String,
    pub sources: Vec<SearchResult>,
}

/// Result of one lookup, serialized with a `mode` tag
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "mode")]
pub enum Answer {
    #[serde(rename = "structured")]
    Structured(StructuredAnswer),
    #[serde(rename = "text_fallback")]
    Fallback(FallbackAnswer),
}

impl Answer {
    pub fn mode(&self) -> &'static str {
        match self {
            Answer::Structured(_) => "structured",
            Answer::Fallback(_) => "text_fallback",
        }
    }
}
