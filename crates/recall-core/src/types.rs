//! Domain types shared by the similarity engine and the selectors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocumentId = String;
pub type Embedding = Vec<f32>;

/// Default metadata shape: a free-form JSON map.
pub type Meta = HashMap<String, serde_json::Value>;

/// A candidate for retrieval.
///
/// - `id`: opaque identifier, carried through to results
/// - `embedding`: precomputed vector; every document compared in one call
///   must share the query's dimensionality
/// - `content`: the text payload
/// - `metadata`: caller-defined key/value data, never inspected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<M = Meta> {
    pub id: DocumentId,
    pub embedding: Embedding,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<M> Document<M> {
    pub fn new(id: impl Into<DocumentId>, content: impl Into<String>, embedding: Embedding) -> Self {
        Self { id: id.into(), embedding, content: content.into(), metadata: None }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn dim(&self) -> usize { self.embedding.len() }
}

/// A document that has not been embedded yet. Input to batch embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument<M = Meta> {
    pub id: DocumentId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<M> NewDocument<M> {
    pub fn new(id: impl Into<DocumentId>, content: impl Into<String>) -> Self {
        Self { id: id.into(), content: content.into(), metadata: None }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn into_document(self, embedding: Embedding) -> Document<M> {
        Document { id: self.id, embedding, content: self.content, metadata: self.metadata }
    }
}

/// One ranked hit.
///
/// `relevance` is the raw cosine similarity to the query. `score` is the
/// value the result was ranked by: the MMR objective at the step it was
/// selected, or `relevance` itself for plain similarity ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<M = Meta> {
    pub id: DocumentId,
    pub content: String,
    pub relevance: f32,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<M: Clone> SearchResult<M> {
    pub fn from_document(doc: &Document<M>, relevance: f32, score: f32) -> Self {
        Self {
            id: doc.id.clone(),
            content: doc.content.clone(),
            relevance,
            score,
            metadata: doc.metadata.clone(),
        }
    }
}

/// Which selector a retrieval call uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mmr,
    Similarity,
}

impl std::str::FromStr for Strategy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mmr" => Ok(Self::Mmr),
            "similarity" | "sim" | "topk" => Ok(Self::Similarity),
            other => Err(crate::Error::InvalidConfig(format!("unknown strategy '{other}'"))),
        }
    }
}
