use recall_core::config::RetrievalConfig;
use recall_core::traits::Embedder;
use recall_core::types::{Document, NewDocument, Strategy};
use recall_core::Error;
use recall_embed::HashEmbedder;
use recall_engine::Retriever;

fn lessons() -> Vec<NewDocument> {
    vec![
        NewDocument::new("alg-1", "solving linear equations with one variable"),
        NewDocument::new("alg-2", "solving linear equations with one unknown variable"),
        NewDocument::new("geo-1", "area of a circle and circumference"),
        NewDocument::new("bio-1", "cell division mitosis and meiosis"),
        NewDocument::new("alg-3", "graphing linear equations on the plane"),
    ]
}

fn retriever(strategy: Strategy, k: usize, lambda: f32) -> Retriever {
    let config = RetrievalConfig { strategy, k, lambda, ..RetrievalConfig::default() };
    Retriever::new(Box::new(HashEmbedder::new(256).unwrap()), config)
}

#[test]
fn embeds_every_document_in_small_batches() {
    let r = retriever(Strategy::Mmr, 3, 0.5).with_batch_size(2);
    let mut progress = Vec::new();
    let docs = r.embed_documents_with(lessons(), |done| progress.push(done)).unwrap();

    assert_eq!(docs.len(), 5);
    assert!(docs.iter().all(|d| d.dim() == 256));
    assert_eq!(progress, [2, 4, 5]);
    assert_eq!(docs[2].id, "geo-1", "input order preserved");
}

#[test]
fn similarity_strategy_returns_both_near_duplicates() {
    let r = retriever(Strategy::Similarity, 2, 0.5);
    let docs = r.embed_documents(lessons()).unwrap();
    let out = r.retrieve("solving linear equations with one variable", &docs).unwrap();

    let mut ids: Vec<_> = out.iter().map(|h| h.id.as_str()).collect();
    ids.sort_unstable();
    assert_eq!(ids, ["alg-1", "alg-2"]);
}

#[test]
fn mmr_strategy_skips_the_near_duplicate() {
    let r = retriever(Strategy::Mmr, 2, 0.3);
    let docs = r.embed_documents(lessons()).unwrap();
    let out = r.retrieve("solving linear equations with one variable", &docs).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, "alg-1");
    assert_ne!(out[1].id, "alg-2");
}

#[test]
fn retrieve_with_embedding_skips_the_embedder() {
    let r = retriever(Strategy::Similarity, 1, 0.7);
    let docs: Vec<Document> = vec![
        Document::new("x", "x", vec![1.0, 0.0]),
        Document::new("y", "y", vec![0.0, 1.0]),
    ];
    let out = r.retrieve_with_embedding(&[0.0, 1.0], &docs).unwrap();
    assert_eq!(out[0].id, "y");
}

#[test]
fn query_dimension_mismatch_surfaces() {
    let r = retriever(Strategy::Mmr, 3, 0.7);
    let docs: Vec<Document> = vec![Document::new("short", "short", vec![1.0, 0.0])];
    let err = r.retrieve("anything", &docs).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::DimensionMismatch { left: 256, right: 2 }));
}

struct RaggedEmbedder;

impl Embedder for RaggedEmbedder {
    fn dim(&self) -> usize { 4 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| vec![1.0; t.len() % 3 + 3]).collect())
    }
}

struct ShortBatchEmbedder;

impl Embedder for ShortBatchEmbedder {
    fn dim(&self) -> usize { 2 }
    fn embed_batch(&self, _texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(vec![vec![1.0, 0.0]])
    }
}

#[test]
fn wrong_vector_length_is_rejected() {
    let r = Retriever::new(Box::new(RaggedEmbedder), RetrievalConfig::default());
    // "abc" -> 3 % 3 + 3 = 3 components, expected 4
    let err = r.embed_documents::<()>(vec![NewDocument::new("a", "abc")]).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::DimensionMismatch { left: 4, right: 3 }));
}

#[test]
fn short_batch_is_rejected() {
    let r = Retriever::new(Box::new(ShortBatchEmbedder), RetrievalConfig::default());
    let items = vec![NewDocument::<()>::new("a", "one"), NewDocument::new("b", "two")];
    let err = r.embed_documents(items).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Embedding(_))), "{err:?}");
}
