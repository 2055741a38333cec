//! recall-engine
//!
//! Glue between an embedding provider and the selectors in `recall-vector`:
//! embed corpora in batches, embed query text, dispatch to MMR or plain
//! similarity ranking according to [`RetrievalConfig`].

use anyhow::{Context, Result};

use recall_core::config::{RetrievalConfig, DEFAULT_BATCH_SIZE};
use recall_core::traits::{Embedder, Selector};
use recall_core::types::{Document, NewDocument, SearchResult, Strategy};
use recall_core::Error;
use recall_vector::{MmrConfig, SearchConfig};

pub struct Retriever {
    embedder: Box<dyn Embedder>,
    config: RetrievalConfig,
    batch_size: usize,
}

impl Retriever {
    pub fn new(embedder: Box<dyn Embedder>, config: RetrievalConfig) -> Self {
        Self { embedder, config, batch_size: DEFAULT_BATCH_SIZE }
    }

    /// Documents per `embed_batch` call. Clamped to at least 1.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn config(&self) -> &RetrievalConfig { &self.config }

    pub fn embedder(&self) -> &dyn Embedder { self.embedder.as_ref() }

    pub fn mmr_config(&self) -> MmrConfig {
        MmrConfig::new(self.config.k, self.config.lambda).with_threshold(self.config.threshold)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig::new(self.config.k).with_threshold(self.config.threshold)
    }

    pub fn embed_documents<M>(&self, items: Vec<NewDocument<M>>) -> Result<Vec<Document<M>>> {
        self.embed_documents_with(items, |_| {})
    }

    /// Embed `items` batch by batch, calling `on_batch` with the number of
    /// documents finished so far after each batch.
    pub fn embed_documents_with<M, F>(&self, items: Vec<NewDocument<M>>, mut on_batch: F) -> Result<Vec<Document<M>>>
    where
        F: FnMut(usize),
    {
        let dim = self.embedder.dim();
        let mut out = Vec::with_capacity(items.len());
        let mut pending = items.into_iter().peekable();
        while pending.peek().is_some() {
            let batch: Vec<NewDocument<M>> = pending.by_ref().take(self.batch_size).collect();
            let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
            let first_id = batch.first().map(|d| d.id.clone()).unwrap_or_default();
            let vectors = self
                .embedder
                .embed_batch(&texts)
                .with_context(|| format!("embedding batch starting at '{first_id}'"))?;
            if vectors.len() != batch.len() {
                return Err(Error::Embedding(format!(
                    "embedder returned {} vectors for {} texts",
                    vectors.len(),
                    batch.len()
                ))
                .into());
            }
            for (item, vector) in batch.into_iter().zip(vectors) {
                if vector.len() != dim {
                    return Err(anyhow::Error::new(Error::DimensionMismatch { left: dim, right: vector.len() })
                        .context(format!("document '{}'", item.id)));
                }
                out.push(item.into_document(vector));
            }
            on_batch(out.len());
        }
        tracing::debug!(documents = out.len(), dim, "embedded documents");
        Ok(out)
    }

    /// Embed `query` and rank `documents` with the configured strategy.
    pub fn retrieve<M: Clone>(&self, query: &str, documents: &[Document<M>]) -> Result<Vec<SearchResult<M>>> {
        let query_vec = self.embedder.embed_one(query).context("embedding query")?;
        Ok(self.retrieve_with_embedding(&query_vec, documents)?)
    }

    /// Rank `documents` against an already computed query vector.
    pub fn retrieve_with_embedding<M: Clone>(
        &self,
        query: &[f32],
        documents: &[Document<M>],
    ) -> recall_core::Result<Vec<SearchResult<M>>> {
        let results = match self.config.strategy {
            Strategy::Mmr => self.mmr_config().select(query, documents)?,
            Strategy::Similarity => self.search_config().select(query, documents)?,
        };
        tracing::debug!(
            strategy = ?self.config.strategy,
            candidates = documents.len(),
            results = results.len(),
            "retrieval done"
        );
        Ok(results)
    }
}
