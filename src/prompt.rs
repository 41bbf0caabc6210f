// ============================================================================
// File: src/prompt.rs
// Prompt construction for dealer extraction
// ============================================================================

use tiktoken_rs::p50k_base;

use crate::config::FinderSettings;
use crate::models::{Message, SearchResult};

/// Extraction contract given to the model as the system message. `{brand}`
/// is replaced with the configured brand name.
pub const SYSTEM_PROMPT_TEMPLATE: &str = r#"You are a dealership-finder assistant for India.
You must return ONLY valid JSON (no markdown, no code fences, no commentary).

Rules:
- Use ONLY the provided web results. Do NOT invent details.
- If name/address/phone/hours/city/area/website are not present in the results, set them to null.
- Pick at most the top 3 most relevant {brand} dealers/showrooms.
- "confidence" must be one of: "high", "medium", "low".
- If the query has no clear location, set "follow_up_question" to a short question asking for it; otherwise set it to null.

Return JSON in this schema:
{
  "dealers": [
    {
      "name": string|null,
      "address": string|null,
      "phone": string|null,
      "hours": string|null,
      "city": string|null,
      "area": string|null,
      "website": string|null,
      "confidence": "high"|"medium"|"low"
    }
  ],
  "follow_up_question": string|null
}"#;

pub fn default_system_prompt(brand: &str) -> String {
    SYSTEM_PROMPT_TEMPLATE.replace("{brand}", brand)
}

/// The two role blocks sent to the model
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system.clone()),
            Message::user(self.user.clone()),
        ]
    }

    /// Approximate token count of both blocks.
    pub fn estimated_tokens(&self) -> anyhow::Result<usize> {
        let bpe = p50k_base()?;
        let system = bpe.encode_with_special_tokens(&self.system).len();
        let user = bpe.encode_with_special_tokens(&self.user).len();
        Ok(system + user)
    }
}

/// Reduce results to title, url and at most `limit` characters of content.
pub fn compact(results: &[SearchResult], limit: usize) -> Vec<SearchResult> {
    results
        .iter()
        .map(|r| SearchResult {
            title: r.title.clone(),
            url: r.url.clone(),
            content: truncate(&r.content, limit),
        })
        .collect()
}

/// Build the prompt from the user's original wording and raw search results.
/// Each result is compacted to `content_char_limit` characters here; the
/// compacted list is returned alongside the prompt because it is the list
/// the model was offered.
pub fn build_prompt(
    original_query: &str,
    results: &[SearchResult],
    settings: &FinderSettings,
) -> (Prompt, Vec<SearchResult>) {
    let compacted = compact(results, settings.content_char_limit);

    // Serializing plain strings and options cannot fail.
    let results_json = serde_json::to_string(&compacted).unwrap_or_else(|_| "[]".to_string());

    let system = match &settings.system_prompt {
        Some(custom) => custom.clone(),
        None => default_system_prompt(&settings.brand_name),
    };

    let prompt = Prompt {
        system,
        user: format!(
            "User query: {}\n\nWeb results:\n{}\n",
            original_query, results_json
        ),
    };
    (prompt, compacted)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
