//! recall-vector
//!
//! Exhaustive, in-memory ranking over caller-owned documents: cosine
//! similarity (`similarity`), Maximal Marginal Relevance selection (`mmr`)
//! and plain top-k relevance ranking (`search`). Everything here is
//! synchronous and free of shared state.

pub mod mmr;
pub mod search;
pub mod similarity;

pub use mmr::{mmr_search, MmrConfig};
pub use search::{similarity_search, SearchConfig};
pub use similarity::{cosine_similarity, normalize_embedding, normalize_in_place};
