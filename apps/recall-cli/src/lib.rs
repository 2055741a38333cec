//! Shared helpers for the `recall-embed` and `recall-search` binaries:
//! logging setup and JSON corpus I/O.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use recall_core::types::{Document, SearchResult};
use recall_core::Error;

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let raw = serde_json::to_string_pretty(value)?;
    fs::write(path, raw).with_context(|| format!("writing {}", path.display()))
}

/// Dimensionality shared by every document, `None` for an empty corpus.
pub fn corpus_dim<M>(docs: &[Document<M>]) -> Result<Option<usize>> {
    let Some(first) = docs.first() else { return Ok(None) };
    let dim = first.dim();
    if let Some(bad) = docs.iter().find(|d| d.dim() != dim) {
        return Err(anyhow::Error::new(Error::DimensionMismatch { left: dim, right: bad.dim() })
            .context(format!("document '{}' disagrees with '{}'", bad.id, first.id)));
    }
    Ok(Some(dim))
}

/// Human-readable listing, one result per block.
pub fn format_results<M>(query: &str, results: &[SearchResult<M>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} results for: \"{}\"", results.len(), query);
    for (i, r) in results.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n  {}. score={:.4}  relevance={:.4}  id={}",
            i + 1,
            r.score,
            r.relevance,
            r.id
        );
        let _ = writeln!(out, "     {}", r.content);
    }
    out
}
