// ============================================================================
// File: src/markdown.rs
// Markdown export functionality
// ============================================================================

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::models::{Answer, DealerRecord, FallbackAnswer, StructuredAnswer};

pub struct MarkdownExporter<'a> {
    query: &'a str,
    answer: &'a Answer,
}

impl<'a> MarkdownExporter<'a> {
    pub fn new(query: &'a str, answer: &'a Answer) -> Self {
        Self { query, answer }
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    pub fn render(&self) -> String {
        let mut content = String::new();

        self.write_header(&mut content);
        match self.answer {
            Answer::Structured(answer) => self.write_structured(&mut content, answer),
            Answer::Fallback(answer) => self.write_fallback(&mut content, answer),
        }

        content
    }

    fn write_header(&self, content: &mut String) {
        content.push_str(&format!("# Dealer lookup: {}\n\n", self.query));
        content.push_str(&format!("**Date**: {}\n\n", Local::now().format("%Y-%m-%d %H:%M:%S")));
        content.push_str(&format!("**Mode**: {}\n\n", self.answer.mode()));
    }

    fn write_structured(&self, content: &mut String, answer: &StructuredAnswer) {
        if let Some(question) = &answer.follow_up_question {
            content.push_str(&format!("> {}\n\n", question));
        }

        content.push_str("## Dealers\n\n");
        if answer.dealers.is_empty() {
            content.push_str("No dealers found.\n\n");
        }
        for dealer in &answer.dealers {
            write_dealer(content, dealer);
        }

        content.push_str("## Sources\n\n");
        for source in &answer.sources_used {
            let title = source.title.as_deref().unwrap_or(&source.url);
            content.push_str(&format!("- [{}]({})\n", title, source.url));
        }
    }

    fn write_fallback(&self, content: &mut String, answer: &FallbackAnswer) {
        content.push_str("## Model response (unstructured)\n\n");
        content.push_str("```text\n");
        content.push_str(&answer.response);
        content.push_str("\n```\n\n");

        content.push_str("## Sources\n\n");
        for source in &answer.sources {
            match (&source.title, &source.url) {
                (Some(title), Some(url)) => content.push_str(&format!("- [{}]({})\n", title, url)),
                (None, Some(url)) => content.push_str(&format!("- <{}>\n", url)),
                (Some(title), None) => content.push_str(&format!("- {}\n", title)),
                (None, None) => {}
            }
        }
    }
}

fn write_dealer(content: &mut String, dealer: &DealerRecord) {
    content.push_str(&format!(
        "### {}\n\n",
        dealer.name.as_deref().unwrap_or("Unnamed dealer")
    ));

    let rows = [
        ("Address", &dealer.address),
        ("Phone", &dealer.phone),
        ("Hours", &dealer.hours),
        ("City", &dealer.city),
        ("Area", &dealer.area),
        ("Website", &dealer.website),
    ];
    for (label, value) in rows {
        content.push_str(&format!(
            "- **{}**: {}\n",
            label,
            value.as_deref().unwrap_or("-")
        ));
    }
    content.push_str(&format!("- **Confidence**: {}\n\n---\n\n", dealer.confidence.as_str()));
}
