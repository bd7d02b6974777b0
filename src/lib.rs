//! Appleverse: similarity search and ranking over an apple cultivar catalog.
//!
//! Free-text queries are answered with the single best-matching record plus a
//! ranked set of similar records. The pipeline: catalog records → feature
//! blobs → frozen TF-IDF vector space → cosine k-NN index → exact-match
//! promotion policy. Everything is built once at startup and read-only
//! afterwards; refreshes swap in a freshly built engine atomically.

// Module declarations
pub mod catalog;
pub mod engine;
pub mod errors;
pub mod globals;
pub mod ingest;
pub mod neighbor_index;
pub mod ranking;
pub mod text_processing;
pub mod types;
pub mod vectorizer;

// Re-exports for commonly used types
pub use engine::SearchEngine;
pub use errors::{EngineError, EngineResult};
pub use types::{CatalogRecord, ScoredRecord, SearchResponse};
