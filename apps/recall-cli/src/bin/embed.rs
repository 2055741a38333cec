use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use recall_cli::{init_logging, read_json, write_json};
use recall_core::config::{expand_path, Config};
use recall_core::types::{Document, NewDocument};
use recall_embed::HashEmbedder;
use recall_engine::Retriever;

/// Embed a JSON corpus of `{id, content, metadata?}` objects.
#[derive(Parser)]
#[command(name = "recall-embed", about = "Embed a JSON corpus with the built-in hash embedder", long_about = None)]
struct Cli {
    /// Input JSON array of raw documents
    #[arg(short, long)]
    input: String,

    /// Output JSON array of embedded documents
    #[arg(short, long)]
    output: String,

    /// Embedding dimension (defaults to embedding.dim from config)
    #[arg(short, long)]
    dim: Option<usize>,

    /// Documents per embedding batch (defaults to embedding.batch_size)
    #[arg(short, long)]
    batch_size: Option<usize>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = Config::load()?;
    let embedding = config.embedding()?;
    let dim = cli.dim.unwrap_or(embedding.dim);
    let batch_size = cli.batch_size.unwrap_or(embedding.batch_size);

    let input = expand_path(&cli.input);
    let output = expand_path(&cli.output);
    let raw: Vec<NewDocument> = read_json(&input)?;
    tracing::info!(documents = raw.len(), dim, batch_size, input = %input.display(), "embedding corpus");

    let retriever = Retriever::new(Box::new(HashEmbedder::new(dim)?), config.retrieval()?).with_batch_size(batch_size);
    let pb = ProgressBar::new(raw.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%)")?
            .progress_chars("#>-"),
    );
    let docs: Vec<Document> = retriever.embed_documents_with(raw, |done| pb.set_position(done as u64))?;
    pb.finish_and_clear();

    write_json(&output, &docs)?;
    tracing::info!(documents = docs.len(), output = %output.display(), "corpus written");
    Ok(())
}
