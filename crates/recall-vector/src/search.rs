use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use recall_core::config::{DEFAULT_K, DEFAULT_THRESHOLD};
use recall_core::traits::Selector;
use recall_core::types::{Document, SearchResult};
use recall_core::Result;

use crate::similarity::cosine_similarity;

/// Parameters for [`similarity_search`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub k: usize,
    pub threshold: f32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { k: DEFAULT_K, threshold: DEFAULT_THRESHOLD }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn new(k: usize) -> Self {
        Self { k, threshold: DEFAULT_THRESHOLD }
    }

    #[must_use]
    pub const fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }
}

/// Score every document against `query` and keep those with
/// `relevance >= threshold`, in input order.
///
/// Every document is scored before any is dropped, so a dimension mismatch
/// anywhere in the slice fails the call.
pub(crate) fn relevant_candidates<'a, M>(
    query: &[f32],
    documents: &'a [Document<M>],
    threshold: f32,
) -> Result<Vec<(&'a Document<M>, f32)>> {
    let scored = documents
        .iter()
        .map(|doc| cosine_similarity(query, &doc.embedding).map(|rel| (doc, rel)))
        .collect::<Result<Vec<_>>>()?;
    Ok(scored.into_iter().filter(|&(_, rel)| rel >= threshold).collect())
}

/// Top-`k` documents by relevance alone, highest first.
///
/// Equal relevance keeps input order. `score` equals `relevance` on every
/// result.
///
/// # Errors
///
/// [`recall_core::Error::DimensionMismatch`] if any document's embedding
/// length differs from the query's.
pub fn similarity_search<M: Clone>(
    query: &[f32],
    documents: &[Document<M>],
    config: SearchConfig,
) -> Result<Vec<SearchResult<M>>> {
    if config.k == 0 || documents.is_empty() {
        return Ok(Vec::new());
    }
    let mut candidates = relevant_candidates(query, documents, config.threshold)?;
    // stable sort
    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    candidates.truncate(config.k);
    tracing::debug!(total = documents.len(), returned = candidates.len(), "similarity search done");
    Ok(candidates
        .into_iter()
        .map(|(doc, rel)| SearchResult::from_document(doc, rel, rel))
        .collect())
}

impl<M: Clone> Selector<M> for SearchConfig {
    fn select(&self, query: &[f32], documents: &[Document<M>]) -> Result<Vec<SearchResult<M>>> {
        similarity_search(query, documents, *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::Error;

    fn doc(id: &str, v: &[f32]) -> Document<()> {
        Document::new(id, id, v.to_vec())
    }

    #[test]
    fn ranks_by_relevance_descending() {
        let docs = vec![doc("low", &[0.1, 1.0]), doc("high", &[1.0, 0.0]), doc("mid", &[1.0, 1.0])];
        let out = similarity_search(&[1.0, 0.0], &docs, SearchConfig::new(3)).unwrap();
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["high", "mid", "low"]);
        assert!(out.iter().all(|r| r.score == r.relevance));
    }

    #[test]
    fn equal_relevance_keeps_input_order() {
        let docs = vec![doc("x", &[1.0, 1.0]), doc("y", &[2.0, 2.0]), doc("z", &[3.0, 3.0])];
        let out = similarity_search(&[1.0, 1.0], &docs, SearchConfig::new(3)).unwrap();
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["x", "y", "z"]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let docs = vec![doc("orth", &[0.0, 1.0]), doc("neg", &[-1.0, 0.0])];
        let out = similarity_search(&[1.0, 0.0], &docs, SearchConfig::new(5).with_threshold(0.0)).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "orth");
    }

    #[test]
    fn mismatch_fails_even_below_threshold() {
        let docs = vec![doc("a", &[1.0, 0.0]), doc("b", &[1.0])];
        let err = similarity_search(&[1.0, 0.0], &docs, SearchConfig::new(1).with_threshold(0.99)).unwrap_err();
        assert_eq!(err, Error::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn truncates_to_k() {
        let docs: Vec<_> = (0..10u8).map(|i| doc(&i.to_string(), &[1.0, f32::from(i)])).collect();
        assert_eq!(similarity_search(&[1.0, 0.0], &docs, SearchConfig::new(4)).unwrap().len(), 4);
    }
}
