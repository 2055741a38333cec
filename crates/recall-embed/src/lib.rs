//! Deterministic embedder for tests, demos and offline runs.
//!
//! `HashEmbedder` is a bag-of-tokens feature hasher, not a language model:
//! texts that share words end up close, nothing else is captured. Real
//! deployments plug their provider in through [`recall_core::traits::Embedder`].

use anyhow::Result;
use std::hash::{Hash, Hasher};
use twox_hash::XxHash64;

use recall_core::traits::Embedder;
use recall_core::Error;
use recall_vector::normalize_in_place;

#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> recall_core::Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidConfig("embedding dimension must be > 0".into()));
        }
        Ok(Self { dim })
    }

    /// Embed a single text. Lowercased whitespace tokens are hashed into
    /// buckets; the result is L2-normalized (all-zero for empty text).
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h % self.dim as u64) as usize;
            let val = ((h >> 32) as u32) as f32 / u32::MAX as f32;
            v[idx] += 0.5 + val + (i % 3) as f32 * 0.01;
        }
        normalize_in_place(&mut v);
        v
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize { self.dim }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        tracing::trace!(count = texts.len(), dim = self.dim, "hash-embedding batch");
        Ok(texts.iter().map(|t| self.embed_text(t)).collect())
    }
}
