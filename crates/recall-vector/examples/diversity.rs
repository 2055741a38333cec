//! Compare plain relevance ranking with MMR on a corpus with near-duplicates.
//!
//! cargo run -p recall-vector --example diversity

use recall_core::types::Document;
use recall_vector::{mmr_search, similarity_search, MmrConfig, SearchConfig};

fn main() -> recall_core::Result<()> {
    let docs: Vec<Document> = vec![
        Document::new("async-1", "Python async/await", vec![0.95, 0.30, 0.00, 0.05]),
        Document::new("async-2", "Python asyncio guide", vec![0.94, 0.32, 0.02, 0.04]),
        Document::new("async-3", "Python async tutorial", vec![0.93, 0.33, 0.00, 0.06]),
        Document::new("rust", "Rust async/await", vec![0.70, 0.00, 0.70, 0.10]),
        Document::new("go", "Go goroutines", vec![0.55, 0.05, 0.10, 0.82]),
    ];
    let query = [1.0, 0.2, 0.2, 0.2];

    println!("similarity_search:");
    for r in similarity_search(&query, &docs, SearchConfig::new(3))? {
        println!("  {:<8} relevance={:.3}", r.id, r.relevance);
    }

    for lambda in [1.0, 0.7, 0.5, 0.3] {
        println!("mmr_search lambda={lambda}:");
        for r in mmr_search(&query, &docs, MmrConfig::new(3, lambda))? {
            println!("  {:<8} relevance={:.3} score={:.3}", r.id, r.relevance, r.score);
        }
    }
    Ok(())
}
