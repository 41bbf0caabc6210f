// ============================================================================
// File: src/display.rs
// Terminal rendering of answers
// ============================================================================

use colored::*;

use crate::models::{
    Answer, Confidence, DealerRecord, FallbackAnswer, SearchResult, SourceRef, StructuredAnswer,
};

pub fn print_header(query: &str) {
    println!("{}", "\n═══════════════════════════════════════".bright_blue());
    println!("{}", "        TATA MOTORS DEALER FINDER".bright_white().bold());
    println!("{}", "═══════════════════════════════════════".bright_blue());
    println!("\n{}: {}\n", "Query".green().bold(), query);
}

pub fn print_answer(answer: &Answer) {
    match answer {
        Answer::Structured(structured) => print_structured(structured),
        Answer::Fallback(fallback) => print_fallback(fallback),
    }
}

fn print_structured(answer: &StructuredAnswer) {
    if let Some(question) = &answer.follow_up_question {
        println!("{} {}\n", "?".yellow().bold(), question.yellow());
    }

    if answer.dealers.is_empty() {
        println!("{} No dealers found.", "ℹ".blue().bold());
    } else {
        for dealer in &answer.dealers {
            print_dealer(dealer);
        }
    }

    print_source_refs(&answer.sources_used);
}

fn print_dealer(dealer: &DealerRecord) {
    println!(
        "{} {}",
        "●".bright_cyan(),
        dealer.name.as_deref().unwrap_or("Unnamed dealer").bright_white().bold()
    );
    println!("{}", "─".repeat(40).bright_black());

    print_field("Address", &dealer.address);
    print_field("Phone", &dealer.phone);
    print_field("Hours", &dealer.hours);
    print_field("City", &dealer.city);
    print_field("Area", &dealer.area);

    let confidence = match dealer.confidence {
        Confidence::High => "high".green(),
        Confidence::Medium => "medium".yellow(),
        Confidence::Low => "low".red(),
    };
    println!("  {:<11}{}", "Confidence:".bright_black(), confidence);

    if let Some(website) = &dealer.website {
        println!("  {:<11}{}", "Website:".bright_black(), website.bright_cyan().underline());
    }
    println!();
}

fn print_field(label: &str, value: &Option<String>) {
    let value = match value {
        Some(v) => v.normal(),
        None => "-".bright_black(),
    };
    println!("  {:<11}{}", format!("{}:", label).bright_black(), value);
}

fn print_fallback(answer: &FallbackAnswer) {
    println!(
        "{} Model returned unstructured response.\n",
        "⚠".yellow().bold()
    );
    println!("{}", answer.response);
    print_search_results(&answer.sources);
}

fn print_source_refs(sources: &[SourceRef]) {
    print_sources(&source_ref_rows(sources));
}

fn print_search_results(sources: &[SearchResult]) {
    print_sources(&search_result_rows(sources));
}

fn source_ref_rows(sources: &[SourceRef]) -> Vec<(Option<&str>, &str)> {
    sources
        .iter()
        .map(|s| (s.title.as_deref(), s.url.as_str()))
        .collect()
}

fn search_result_rows(sources: &[SearchResult]) -> Vec<(Option<&str>, &str)> {
    sources
        .iter()
        .map(|s| (s.title.as_deref(), s.url.as_deref().unwrap_or("")))
        .collect()
}

fn print_sources(rows: &[(Option<&str>, &str)]) {
    if rows.is_empty() {
        return;
    }
    println!("\n{}", "Sources offered".green().bold());
    for (i, (title, url)) in rows.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            title.unwrap_or("(untitled)"),
            url.bright_black()
        );
    }
}
