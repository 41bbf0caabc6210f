// ============================================================================
// File: src/main.rs
// Entry point and CLI handling
// ============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use dealer_finder::config::{Config, FinderSettings};
use dealer_finder::display;
use dealer_finder::markdown::MarkdownExporter;
use dealer_finder::DealerFinder;

/// Command-line arguments for the dealer finder
#[derive(Parser, Debug)]
#[command(name = "dealer-finder", version)]
#[command(about = "Find the nearest Tata Motors dealership anywhere in India", long_about = None)]
struct Args {
    /// Free-text query, e.g. "Nearest Tata dealer in Wakad Pune"
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,

    /// Path to an optional JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the answer as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Also write the answer to this markdown file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the number of search results requested
    #[arg(long)]
    max_results: Option<usize>,

    /// Enable verbose output (shows search queries and debug info)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Settings file is optional; credentials are not
    let mut settings = match &args.config {
        Some(path) => FinderSettings::from_file(path)?,
        None => FinderSettings::default(),
    };
    if let Some(max_results) = args.max_results {
        settings.max_results = max_results;
    }
    let config = Config::load(settings)?;
    let finder = DealerFinder::from_config(config)?;

    let query = args.query.join(" ");
    if !args.json {
        display::print_header(&query);
    }

    let spinner = (!args.json).then(create_spinner);
    let result = finder.answer(&query).await;
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let answer = result.context("dealer lookup failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        display::print_answer(&answer);
    }

    if let Some(path) = &args.output {
        MarkdownExporter::new(&query, &answer)
            .export(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        if !args.json {
            println!(
                "\n{} Answer exported to: {}",
                "✓".green().bold(),
                path.display().to_string().bright_cyan()
            );
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "dealer_finder=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Searching dealers...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
