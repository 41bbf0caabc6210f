// ============================================================================
// File: src/extractor.rs
// Model invocation and tolerant parsing of its output
// ============================================================================

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::FinderSettings;
use crate::error::Result;
use crate::llm_client::ChatModel;
use crate::models::{
    Answer, ChatRequest, Confidence, DealerRecord, FallbackAnswer, SearchResult, SourceRef,
    StructuredAnswer,
};
use crate::prompt::build_prompt;

pub struct Extractor {
    model: Arc<dyn ChatModel>,
    settings: FinderSettings,
}

impl Extractor {
    pub fn new(model: Arc<dyn ChatModel>, settings: FinderSettings) -> Self {
        Self { model, settings }
    }

    /// Ask the model to turn `results` into dealer records. Output that does
    /// not parse becomes a fallback answer; only model transport failures are
    /// returned as errors.
    pub async fn extract(&self, query: &str, results: &[SearchResult]) -> Result<Answer> {
        let (prompt, compacted) = build_prompt(query, results, &self.settings);

        match prompt.estimated_tokens() {
            Ok(tokens) => debug!(tokens, sources = compacted.len(), "prompt built"),
            Err(e) => debug!(error = %e, "token estimate unavailable"),
        }

        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages: prompt.messages(),
            temperature: self.settings.temperature,
        };

        let raw = self.model.complete(&request).await?;
        Ok(interpret(query, &raw, compacted))
    }
}

/// Turn raw model text into an answer. Never fails.
pub fn interpret(query: &str, raw: &str, compacted: Vec<SearchResult>) -> Answer {
    let text = strip_code_fences(raw);

    let parsed = match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(object)) => Some(object),
        Ok(other) => {
            warn!(kind = json_kind(&other), "model returned JSON that is not an object");
            None
        }
        Err(e) => {
            warn!(error = %e, "model output is not valid JSON");
            None
        }
    };

    match parsed {
        Some(object) => Answer::Structured(structured_answer(&object, &compacted)),
        None => {
            debug!(raw, "falling back to raw model text");
            Answer::Fallback(FallbackAnswer {
                query: query.to_string(),
                response: text,
                sources: compacted,
            })
        }
    }
}

/// Remove surrounding whitespace and a ```json / ``` fence pair.
pub fn strip_code_fences(text: &str) -> String {
    let mut t = text.trim();

    if let Some(rest) = strip_prefix_ignore_case(t, "```json") {
        t = rest.trim();
    }
    if let Some(rest) = t.strip_prefix("```") {
        t = rest.trim();
    }
    if let Some(rest) = t.strip_suffix("```") {
        t = rest.trim();
    }

    t.to_string()
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

fn structured_answer(object: &Map<String, Value>, compacted: &[SearchResult]) -> StructuredAnswer {
    let dealers = object
        .get("dealers")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(dealer_record)
                .collect()
        })
        .unwrap_or_default();

    StructuredAnswer {
        dealers,
        follow_up_question: object.get("follow_up_question").and_then(text_field),
        sources_used: sources_used(compacted),
    }
}

fn dealer_record(item: &Map<String, Value>) -> DealerRecord {
    let field = |name: &str| item.get(name).and_then(text_field);

    let confidence = match item.get("confidence").and_then(Value::as_str) {
        Some(label) => Confidence::parse(label).unwrap_or_else(|| {
            warn!(label, "unknown confidence label, using low");
            Confidence::Low
        }),
        None => {
            warn!("dealer without confidence, using low");
            Confidence::Low
        }
    };

    DealerRecord {
        name: field("name"),
        address: field("address"),
        phone: field("phone"),
        hours: field("hours"),
        city: field("city"),
        area: field("area"),
        website: field("website"),
        confidence,
    }
}

/// Strings are kept, scalars stringified, blanks and structures dropped.
fn text_field(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn sources_used(compacted: &[SearchResult]) -> Vec<SourceRef> {
    compacted
        .iter()
        .filter_map(|r| {
            let url = r.url.as_deref().filter(|u| !u.is_empty())?;
            Some(SourceRef {
                title: r.title.clone(),
                url: url.to_string(),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
