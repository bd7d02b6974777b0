//! Nearest-neighbor retrieval over the record vectors.
//!
//! The index is built once over all catalog vectors at startup and immutable
//! afterwards; picking up new records means building a fresh index and
//! swapping it in (see `globals`). Retrieval is an exact brute-force scan
//! under cosine distance — the catalog is a few thousand records, so a full
//! scan per query is bounded floating-point work and keeps results exact and
//! reproducible.
//!
//! ## Ordering guarantee
//!
//! `query` returns neighbors ascending by distance with ties broken by
//! original catalog insertion order. The tie-break is load-bearing: the
//! ranking policy's exact-match promotion depends on a stable, deterministic
//! candidate ordering.

use rayon::prelude::*;

use crate::errors::{EngineError, EngineResult};
use crate::vectorizer::SparseVector;

/// One retrieved neighbor: its cosine distance and its position in the
/// original vector sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Cosine distance, `1 - similarity`, in `[0, 2]` (practically `[0, 1]`
    /// for non-negative TF-IDF vectors)
    pub distance: f32,
    /// Index into the catalog the index was built from
    pub index: usize,
}

/// Immutable k-NN index over a fixed sequence of unit-norm sparse vectors.
#[derive(Debug, Clone)]
pub struct NeighborIndex {
    vectors: Vec<SparseVector>,
}

impl NeighborIndex {
    /// Build the index over all record vectors.
    ///
    /// Vectors must already be L2-normalized (the vectorizer guarantees
    /// this); the index stores them as-is in catalog insertion order.
    pub fn build(vectors: Vec<SparseVector>) -> Self {
        tracing::debug!(vectors = vectors.len(), "built neighbor index");
        Self { vectors }
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Retrieve the `k` nearest vectors by ascending cosine distance.
    ///
    /// A zero query vector (all terms out-of-vocabulary) has no direction;
    /// every indexed vector sits at distance 1 from it and the tie-break
    /// yields plain insertion order.
    ///
    /// # Errors
    ///
    /// * `InsufficientCandidates` - if `k` exceeds the number of indexed
    ///   vectors. Callers cap `k` at corpus size before querying.
    pub fn query(&self, query: &SparseVector, k: usize) -> EngineResult<Vec<Neighbor>> {
        if k > self.vectors.len() {
            return Err(EngineError::InsufficientCandidates {
                requested: k,
                available: self.vectors.len(),
            });
        }

        // Full scan; both vectors are unit norm so similarity is the dot
        // product and distance is its complement.
        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .par_iter()
            .enumerate()
            .map(|(index, vector)| {
                let distance = (1.0 - query.dot(vector)).clamp(0.0, 2.0);
                Neighbor { distance, index }
            })
            .collect();

        // total_cmp keeps the sort total on floats; the index tie-break makes
        // equal-distance ordering follow catalog insertion order.
        neighbors.sort_unstable_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }
}
