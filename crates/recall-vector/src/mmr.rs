//! Maximal Marginal Relevance selection.
//!
//! Greedily picks the candidate maximizing
//! `λ * relevance(d) - (1-λ) * max_{s ∈ selected} cos(d, s)`
//! until `k` results are chosen or the pool runs dry.
//!
//! | λ | Behaviour |
//! |---|-----------|
//! | 1.0 | pure relevance, same order as [`similarity_search`](crate::similarity_search) |
//! | 0.5 | balanced |
//! | 0.0 | pure diversity against what is already selected |
//!
//! Values outside `[0, 1]` are used as given.
//!
//! # Example
//!
//! ```rust
//! use recall_core::types::Document;
//! use recall_vector::{mmr_search, MmrConfig};
//!
//! let docs: Vec<Document> = vec![
//!     Document::new("a", "quadratic formula", vec![1.0, 0.0, 0.0]),
//!     Document::new("b", "quadratic formula, again", vec![0.99, 0.1, 0.0]),
//!     Document::new("c", "completing the square", vec![0.0, 0.0, 1.0]),
//! ];
//! let query = [1.0, 0.0, 0.5];
//!
//! let picked = mmr_search(&query, &docs, MmrConfig::new(2, 0.5)).unwrap();
//! assert_eq!(picked[0].id, "a");
//! assert_eq!(picked[1].id, "c"); // the near-duplicate "b" is skipped
//! ```

use serde::{Deserialize, Serialize};

use recall_core::config::{DEFAULT_K, DEFAULT_LAMBDA, DEFAULT_THRESHOLD};
use recall_core::traits::Selector;
use recall_core::types::{Document, SearchResult};
use recall_core::Result;

use crate::search::relevant_candidates;
use crate::similarity::cosine_similarity;

/// Parameters for [`mmr_search`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MmrConfig {
    /// Maximum number of results. `0` returns nothing.
    pub k: usize,
    /// Relevance/diversity trade-off. Not validated.
    pub lambda: f32,
    /// Minimum relevance for candidacy (inclusive).
    pub threshold: f32,
}

impl Default for MmrConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K, lambda: DEFAULT_LAMBDA, threshold: DEFAULT_THRESHOLD }
    }
}

impl MmrConfig {
    #[must_use]
    pub const fn new(k: usize, lambda: f32) -> Self {
        Self { k, lambda, threshold: DEFAULT_THRESHOLD }
    }

    #[must_use]
    pub const fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[must_use]
    pub const fn with_lambda(mut self, lambda: f32) -> Self {
        self.lambda = lambda;
        self
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Select up to `config.k` documents balancing relevance and diversity.
///
/// Results come back in selection order, which is the rank order. Each
/// result's `score` is the MMR objective at the step it was picked and its
/// `relevance` the raw cosine similarity to `query`.
///
/// Candidates below `config.threshold` are dropped before selection, keeping
/// input order. Ties on the objective go to the candidate that comes first
/// in that order, so identical inputs always give identical output.
///
/// # Errors
///
/// [`recall_core::Error::DimensionMismatch`] if any document's embedding
/// length differs from the query's. No partial result is returned.
pub fn mmr_search<M: Clone>(
    query: &[f32],
    documents: &[Document<M>],
    config: MmrConfig,
) -> Result<Vec<SearchResult<M>>> {
    if config.k == 0 || documents.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = relevant_candidates(query, documents, config.threshold)?;
    if candidates.is_empty() {
        tracing::debug!(total = documents.len(), threshold = config.threshold, "no candidate met the threshold");
        return Ok(Vec::new());
    }

    let n = candidates.len();
    let want = config.k.min(n);
    let mut selected: Vec<SearchResult<M>> = Vec::with_capacity(want);
    // Positions into `candidates`, kept in input order.
    let mut remaining: Vec<usize> = (0..n).collect();
    // Highest similarity of each candidate to anything selected so far.
    let mut max_sim = vec![f32::NEG_INFINITY; n];

    while selected.len() < want {
        let mut best: Option<(usize, f32)> = None;
        for (pos, &cand) in remaining.iter().enumerate() {
            let redundancy = if selected.is_empty() { 0.0 } else { max_sim[cand] };
            let score = config.lambda * candidates[cand].1 - (1.0 - config.lambda) * redundancy;
            // Strictly greater: on ties the earlier candidate stays.
            let better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if better {
                best = Some((pos, score));
            }
        }
        let Some((pos, score)) = best else { break };

        let chosen = remaining.remove(pos);
        let (doc, relevance) = candidates[chosen];
        for &cand in &remaining {
            let sim = cosine_similarity(&candidates[cand].0.embedding, &doc.embedding)?;
            if sim > max_sim[cand] {
                max_sim[cand] = sim;
            }
        }
        selected.push(SearchResult::from_document(doc, relevance, score));
    }

    tracing::debug!(
        total = documents.len(),
        candidates = n,
        selected = selected.len(),
        lambda = config.lambda,
        "mmr selection done"
    );
    Ok(selected)
}

impl<M: Clone> Selector<M> for MmrConfig {
    fn select(&self, query: &[f32], documents: &[Document<M>]) -> Result<Vec<SearchResult<M>>> {
        mmr_search(query, documents, *self)
    }
}
