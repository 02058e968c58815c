use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use lexsearch_core::dataset::load_texts;
use lexsearch_core::{SearchEngine, Term, DEFAULT_LIMIT};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "lexsearch")]
#[command(about = "Query and inspect a TF-IDF index built from a text corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a dataset and print the best matches for a query
    Query {
        /// Dataset path (csv, json, jsonl, txt, or a directory)
        #[arg(long)]
        dataset: PathBuf,
        /// Number of results to print
        #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
        k: usize,
        /// Free-text query
        query: String,
    },
    /// Ingest a dataset and print corpus statistics
    Stats {
        /// Dataset path (csv, json, jsonl, txt, or a directory)
        #[arg(long)]
        dataset: PathBuf,
        /// How many of the most widespread terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { dataset, k, query } => run_query(&dataset, &query, k),
        Commands::Stats { dataset, top } => run_stats(&dataset, top),
    }
}

fn load(dataset: &Path) -> Result<SearchEngine> {
    let texts = load_texts(dataset)?;
    let mut engine = SearchEngine::new();
    let num_docs = engine.ingest(texts);
    if num_docs == 0 {
        bail!("dataset {} contains no documents", dataset.display());
    }
    tracing::info!(dataset = %dataset.display(), num_docs, vocabulary_size = engine.vocabulary().len(), "corpus ready");
    Ok(engine)
}

fn run_query(dataset: &Path, query: &str, k: usize) -> Result<()> {
    let engine = load(dataset)?;
    let hits = engine.search_scored(query, k);
    tracing::info!(query, k, hits = hits.len(), "query complete");
    if hits.is_empty() {
        println!("No documents found");
        return Ok(());
    }
    for (rank, hit) in hits.iter().enumerate() {
        let title = hit.document.text.lines().next().unwrap_or("").trim();
        println!("{:>3}. [{:.4}] {}", rank + 1, hit.score, title);
    }
    Ok(())
}

fn run_stats(dataset: &Path, top: usize) -> Result<()> {
    let engine = load(dataset)?;
    println!("documents:  {}", engine.len());
    println!("vocabulary: {}", engine.vocabulary().len());

    let mut by_df: Vec<(&Term, u32)> = engine
        .vocabulary()
        .iter()
        .map(|term| (term, engine.document_frequency(term)))
        .collect();
    // vocabulary is sorted, so the stable sort breaks ties by term
    by_df.sort_by(|a, b| b.1.cmp(&a.1));
    for (term, df) in by_df.into_iter().take(top) {
        println!("{df:>8}  {term}");
    }
    Ok(())
}
