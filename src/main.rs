use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use appleverse::catalog::load_catalog;
use appleverse::engine::SearchEngine;
use appleverse::ingest;
use appleverse::types::SearchResponse;

#[derive(Parser)]
#[command(name = "appleverse")]
#[command(about = "Appleverse - Cultivar Catalog Search\nSimilarity search and ranking over an apple accession catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the catalog file from a spreadsheet export and an image folder
    Ingest {
        /// Spreadsheet export: JSON array of column -> value rows
        rows: PathBuf,
        /// Directory of cultivar photographs (matched by MAL code)
        images: PathBuf,
        /// Where to write the catalog JSON
        #[arg(short, long, default_value = "catalog.json")]
        output: PathBuf,
    },
    /// Query the catalog for the best match and similar cultivars
    Search {
        /// Catalog file produced by `ingest`
        #[arg(short, long, default_value = "catalog.json")]
        catalog: PathBuf,
        /// Number of results to return (main result + similar)
        #[arg(short = 'n', long, default_value = "5")]
        top_n: usize,
        /// Free-text query (space-separated terms)
        #[arg(required = true)]
        query: Vec<String>,
        /// Print the raw JSON response instead of formatted output
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ingest { rows, images, output } => {
            let count = ingest::ingest(&rows, &images, &output)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Ingested {} records into {}", count, output.display());
            Ok(())
        }
        Command::Search {
            catalog,
            top_n,
            query,
            json,
        } => {
            let records = load_catalog(&catalog).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let engine = SearchEngine::build(records).map_err(|e| anyhow::anyhow!(e.user_message()))?;

            let query = query.join(" ");
            let response = engine
                .search(&query, top_n)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;

            if json {
                let serialized = serde_json::to_string_pretty(&response)
                    .context("Failed to serialize search response")?;
                println!("{serialized}");
            } else {
                display_response(&response, &query);
            }
            Ok(())
        }
    }
}

/// Pretty-print a search response for the terminal.
fn display_response(response: &SearchResponse, query: &str) {
    println!(
        "{} {}",
        "Main result for".bold(),
        format!("\"{}\"", query).yellow().bold()
    );
    display_record(&response.main_result.record.cultivar_name, response);

    if response.similar_results.is_empty() {
        println!("\n{}", "No similar cultivars found.".dimmed());
        return;
    }

    println!("\n{}", "Similar cultivars:".bold());
    for similar in &response.similar_results {
        let name = if similar.record.cultivar_name.is_empty() {
            similar.record.id.as_str()
        } else {
            similar.record.cultivar_name.as_str()
        };
        println!(
            "  {:<30} {}  {}",
            name.blue(),
            format!("[{}]", similar.record.accession).dimmed(),
            format!("{:.3}", similar.similarity_score).green()
        );
    }
}

fn display_record(name: &str, response: &SearchResponse) {
    let main = &response.main_result;
    let shown_name = if name.is_empty() { main.record.id.as_str() } else { name };
    println!(
        "  {} {} {}",
        shown_name.blue().bold(),
        format!("[{}]", main.record.accession).dimmed(),
        format!("score {:.3}", main.similarity_score).green()
    );

    let mut origin_parts: Vec<&str> = Vec::new();
    for part in [
        main.record.origin_city.as_str(),
        main.record.origin_province.as_str(),
        main.record.origin_country.as_str(),
    ] {
        if !part.is_empty() {
            origin_parts.push(part);
        }
    }
    if !origin_parts.is_empty() {
        println!("  origin: {}", origin_parts.join(", "));
    }
    if !main.record.pedigree.is_empty() {
        println!("  pedigree: {}", main.record.pedigree);
    }
    if !main.record.images.is_empty() {
        println!("  images: {}", main.record.images.join(", "));
    }
}
