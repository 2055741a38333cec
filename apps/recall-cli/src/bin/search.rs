use anyhow::Result;
use clap::Parser;

use recall_cli::{corpus_dim, format_results, init_logging, read_json};
use recall_core::config::{expand_path, Config};
use recall_core::types::{Document, Strategy};
use recall_embed::HashEmbedder;
use recall_engine::Retriever;

/// Rank an embedded JSON corpus against a text query.
#[derive(Parser)]
#[command(name = "recall-search", about = "Relevance and MMR search over an embedded corpus", long_about = None)]
struct Cli {
    /// Query text
    query: String,

    /// Embedded corpus produced by recall-embed
    #[arg(short, long)]
    corpus: String,

    /// mmr or similarity
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Number of results
    #[arg(short, long)]
    k: Option<usize>,

    /// Relevance/diversity trade-off for mmr (1.0 = pure relevance)
    #[arg(short, long, allow_negative_numbers = true)]
    lambda: Option<f32>,

    /// Minimum cosine similarity to the query
    #[arg(short, long, allow_negative_numbers = true)]
    threshold: Option<f32>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut retrieval = Config::load()?.retrieval()?;
    if let Some(strategy) = cli.strategy { retrieval.strategy = strategy; }
    if let Some(k) = cli.k { retrieval.k = k; }
    if let Some(lambda) = cli.lambda {
        if !(0.0..=1.0).contains(&lambda) {
            tracing::warn!(lambda, "lambda outside [0, 1]; using it unclamped");
        }
        retrieval.lambda = lambda;
    }
    if let Some(threshold) = cli.threshold { retrieval.threshold = threshold; }

    let corpus_path = expand_path(&cli.corpus);
    let docs: Vec<Document> = read_json(&corpus_path)?;
    let Some(dim) = corpus_dim(&docs)? else {
        tracing::warn!(corpus = %corpus_path.display(), "corpus is empty");
        println!("{}", format_results::<()>(&cli.query, &[]));
        return Ok(());
    };

    tracing::info!(documents = docs.len(), dim, strategy = ?retrieval.strategy, k = retrieval.k, "searching");
    let retriever = Retriever::new(Box::new(HashEmbedder::new(dim)?), retrieval);
    let results = retriever.retrieve(&cli.query, &docs)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("{}", format_results(&cli.query, &results));
    }
    Ok(())
}
