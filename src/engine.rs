//! The search engine: one consistent, searchable snapshot of the catalog.
//!
//! `SearchEngine::build` runs the one-time startup sequence — feature blobs →
//! TF-IDF fit → corpus vectorization → neighbor index — and the result is
//! read-only for its whole lifetime. `search` takes `&self` and performs pure
//! reads over the frozen model and index, so arbitrarily many concurrent
//! callers need no coordination. Picking up new catalog records means
//! building a fresh engine and swapping it in through `globals`.

use rayon::prelude::*;

use crate::errors::{EngineError, EngineResult};
use crate::neighbor_index::NeighborIndex;
use crate::ranking::{rank_candidates, CANDIDATE_POOL_PADDING};
use crate::types::{CatalogRecord, SearchResponse};
use crate::vectorizer::TfidfVectorizer;

/// Immutable pairing of catalog snapshot, fitted vector space model, and
/// neighbor index.
#[derive(Debug)]
pub struct SearchEngine {
    records: Vec<CatalogRecord>,
    vectorizer: TfidfVectorizer,
    index: NeighborIndex,
}

impl SearchEngine {
    /// Build an engine from a catalog snapshot.
    ///
    /// Synchronous and startup-fatal on failure: the engine must not serve
    /// until this completes. Blob construction runs once per record here and
    /// never again at query time.
    ///
    /// # Errors
    ///
    /// * `EmptyCorpus` - the catalog has zero records; there is nothing to
    ///   fit a vocabulary over.
    pub fn build(records: Vec<CatalogRecord>) -> EngineResult<Self> {
        let blobs: Vec<String> = records.iter().map(|r| r.feature_blob()).collect();
        let vectorizer = TfidfVectorizer::fit(&blobs)?;

        let vectors = blobs
            .par_iter()
            .map(|blob| vectorizer.transform(blob))
            .collect();
        let index = NeighborIndex::build(vectors);

        tracing::info!(
            records = records.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "search engine built"
        );

        Ok(Self {
            records,
            vectorizer,
            index,
        })
    }

    /// Answer a free-text query with the main result and up to `top_n - 1`
    /// similar results.
    ///
    /// Retrieves `top_n + 3` neighbors (capped at corpus size) so an exact
    /// cultivar-name match just outside the naive top-N window is still
    /// caught, then applies the ranking policy.
    ///
    /// # Errors
    ///
    /// * `EmptyQuery` - the query is empty or whitespace-only; rejected
    ///   before vectorization is attempted.
    /// * `InvalidTopN` - `top_n` is 0.
    pub fn search(&self, query: &str, top_n: usize) -> EngineResult<SearchResponse> {
        if query.trim().is_empty() {
            return Err(EngineError::EmptyQuery);
        }
        if top_n == 0 {
            return Err(EngineError::InvalidTopN { top_n });
        }

        // Cap the padded pool at corpus size rather than surfacing
        // InsufficientCandidates to the caller.
        let k = (top_n + CANDIDATE_POOL_PADDING).min(self.index.len());

        let query_vector = self.vectorizer.transform(query);
        let neighbors = self.index.query(&query_vector, k)?;

        rank_candidates(&self.records, &neighbors, query, top_n)
    }

    /// Number of records in this engine's catalog snapshot.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
