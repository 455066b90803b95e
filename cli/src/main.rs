use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use engine::{paginate, Document, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: i64,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Query a JSONL corpus with TF-IDF ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank corpus documents against a query
    Search {
        /// JSONL corpus file, one document per line
        #[arg(long)]
        corpus: PathBuf,
        /// Free-text query; prefix a term with '-' to exclude it
        query: String,
        /// Whitespace-delimited stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Filter by status instead of the default ACTUAL
        #[arg(long)]
        status: Option<String>,
        /// Split results into pages of this size
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Report which query terms appear in one document
    Match {
        /// JSONL corpus file, one document per line
        #[arg(long)]
        corpus: PathBuf,
        /// Free-text query; prefix a term with '-' to exclude it
        query: String,
        /// Document id to match against
        #[arg(long)]
        id: i64,
        /// Whitespace-delimited stop words
        #[arg(long, default_value = "")]
        stop_words: String,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    results: Vec<Document>,
}

#[derive(Serialize)]
struct PagedOutput<'a> {
    query: &'a str,
    count: usize,
    page_size: usize,
    pages: Vec<Vec<Document>>,
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    query: &'a str,
    id: i64,
    status: DocumentStatus,
    matched: Vec<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { corpus, query, stop_words, status, page_size } => {
            let server = load_corpus(&corpus, &stop_words)?;
            let results = match status {
                Some(status) => {
                    server.find_top_documents_with_status(&query, parse_status(&status)?)?
                }
                None => server.find_top_documents(&query)?,
            };
            let output = match page_size {
                Some(page_size) => serde_json::to_string_pretty(&PagedOutput {
                    query: &query,
                    count: results.len(),
                    page_size,
                    pages: paginate(&results, page_size),
                })?,
                None => serde_json::to_string_pretty(&SearchOutput {
                    query: &query,
                    count: results.len(),
                    results,
                })?,
            };
            println!("{output}");
        }
        Commands::Match { corpus, query, id, stop_words } => {
            let server = load_corpus(&corpus, &stop_words)?;
            let (matched, status) = server.match_document(&query, id)?;
            let output = serde_json::to_string_pretty(&MatchOutput {
                query: &query,
                id,
                status,
                matched,
            })?;
            println!("{output}");
        }
    }
    Ok(())
}

fn load_corpus(path: &Path, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(stop_words)?;
    let file = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("corpus line {}", line_no + 1))?;
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("ingesting document {}", doc.id))?;
    }
    tracing::info!(documents = server.document_count(), "corpus loaded");
    Ok(server)
}

fn parse_status(value: &str) -> Result<DocumentStatus> {
    match value.to_ascii_uppercase().as_str() {
        "ACTUAL" => Ok(DocumentStatus::Actual),
        "IRRELEVANT" => Ok(DocumentStatus::Irrelevant),
        "BANNED" => Ok(DocumentStatus::Banned),
        "REMOVED" => Ok(DocumentStatus::Removed),
        other => bail!("unknown document status {other:?}"),
    }
}
