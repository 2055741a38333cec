use crate::types::{Document, SearchResult};

/// Turns text into fixed-length vectors. Implemented by whatever embedding
/// provider the deployment uses.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;

    fn embed_one(&self, text: &str) -> anyhow::Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("embedder returned no vector for a single input"))
    }
}

/// Ranks a caller-owned candidate set against a query vector.
pub trait Selector<M: Clone> {
    fn select(&self, query: &[f32], documents: &[Document<M>]) -> crate::Result<Vec<SearchResult<M>>>;
}
