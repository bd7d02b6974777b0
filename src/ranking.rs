//! Exact-match promotion and tie-break policy.
//!
//! This is the only part of the engine with genuine branching logic: it turns
//! the neighbor index's raw `(distance, index)` candidates into the
//! `mainResult` / `similarResults` response shape.
//!
//! ## Policy
//!
//! - An **exact match** is case-insensitive, whitespace-trimmed equality
//!   between the query and a candidate's `cultivar_name` — no other field
//!   participates.
//! - If exact matches exist, the *first in retrieval order* becomes the main
//!   result, regardless of its numeric score: textual exactness outranks
//!   cosine similarity for the main slot. The remaining candidates are then
//!   re-sorted by descending score for the similar slots.
//! - With no exact match, the closest retrieved candidate is the main result
//!   and the rest keep plain retrieval order — deliberately *not* re-sorted.
//!
//! The asymmetry between the two branches is observable behavior and is
//! preserved exactly.

use crate::errors::{EngineError, EngineResult};
use crate::neighbor_index::Neighbor;
use crate::types::{CatalogRecord, ScoredRecord, SearchResponse};

/// Extra neighbors retrieved beyond `top_n`.
///
/// The pad widens the candidate pool so an exact textual match sitting just
/// outside the naive top-N window is still caught and promoted. Lowering it
/// trades exact-match recall for a slightly cheaper sort.
pub const CANDIDATE_POOL_PADDING: usize = 3;

/// Convert a cosine distance into the client-facing similarity score:
/// `1 - distance`, rounded to 3 decimal places, clamped to `[0, 1]` against
/// floating-point noise.
pub fn similarity_score(distance: f32) -> f32 {
    let score = ((1.0 - distance) * 1000.0).round() / 1000.0;
    score.clamp(0.0, 1.0)
}

/// Normalize a string for exact-match comparison.
fn normalize_for_match(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Apply the ranking policy to retrieved candidates.
///
/// `neighbors` must be in the index's retrieval order (ascending distance,
/// insertion-order ties); that ordering is the default rank the policy works
/// from. `records` is the catalog the index was built over.
///
/// # Errors
///
/// * `InvalidTopN` - if `top_n` is 0; a response needs a main slot.
/// * `EmptyCorpus` - if no candidates were supplied at all.
pub fn rank_candidates(
    records: &[CatalogRecord],
    neighbors: &[Neighbor],
    query: &str,
    top_n: usize,
) -> EngineResult<SearchResponse> {
    if top_n == 0 {
        return Err(EngineError::InvalidTopN { top_n });
    }
    if neighbors.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }

    // Attach scores, preserving retrieval order as the default rank.
    let candidates: Vec<ScoredRecord> = neighbors
        .iter()
        .map(|neighbor| ScoredRecord {
            record: records[neighbor.index].clone(),
            similarity_score: similarity_score(neighbor.distance),
        })
        .collect();

    let normalized_query = normalize_for_match(query);
    let exact_position = candidates
        .iter()
        .position(|c| normalize_for_match(&c.record.cultivar_name) == normalized_query);

    let (main_result, similar_results) = match exact_position {
        Some(position) => {
            // First exact match in candidate order wins the main slot.
            let main = candidates[position].clone();
            let mut remaining: Vec<ScoredRecord> = candidates
                .into_iter()
                .filter(|c| c.record.id != main.record.id)
                .collect();
            // Stable sort: equal scores keep their retrieval order.
            remaining.sort_by(|a, b| {
                b.similarity_score
                    .partial_cmp(&a.similarity_score)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            remaining.truncate(top_n - 1);
            (main, remaining)
        }
        None => {
            // Closest retrieved candidate is the main result; the rest keep
            // retrieval order, deliberately not re-sorted by score.
            let mut iter = candidates.into_iter();
            let Some(main) = iter.next() else {
                return Err(EngineError::EmptyCorpus);
            };
            let similar: Vec<ScoredRecord> = iter.take(top_n - 1).collect();
            (main, similar)
        }
    };

    Ok(SearchResponse {
        main_result,
        similar_results,
    })
}
