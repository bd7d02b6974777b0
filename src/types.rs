//! Core data types for the cultivar catalog.
//!
//! A [`CatalogRecord`] is one apple accession as supplied by the catalog
//! loader. Records are immutable once loaded into the engine; every field the
//! feature builder touches is a plain `String` that defaults to empty when the
//! source document omits it, so feature construction can never fail on a
//! missing value.

use serde::{Deserialize, Serialize};

/// Number of fields participating in feature-blob construction.
///
/// The blob is an ordered concatenation of exactly these fields:
/// `[id, cultivar_name, accession, origin_country, origin_province,
/// origin_city, pedigree, genus, species]`. The order is part of the engine's
/// observable behavior: the fitted vocabulary is derived from blobs built in
/// this order and stays frozen for the lifetime of the index.
pub const FEATURE_FIELD_COUNT: usize = 9;

/// One cultivar record from the catalog.
///
/// `id` and `accession` are guaranteed unique and non-empty by the catalog
/// loader contract. The descriptive fields may be empty strings; they are
/// never `None` so downstream concatenation stays total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Stable unique identifier (normalized accession in practice)
    pub id: String,
    /// Human-facing cultivar name, e.g. "King David"
    #[serde(default)]
    pub cultivar_name: String,
    /// Accession code, e.g. "mal0101"
    #[serde(default)]
    pub accession: String,
    #[serde(default)]
    pub origin_country: String,
    #[serde(default)]
    pub origin_province: String,
    #[serde(default)]
    pub origin_city: String,
    #[serde(default)]
    pub pedigree: String,
    #[serde(default)]
    pub genus: String,
    #[serde(default)]
    pub species: String,
    /// Image filenames matched to this accession by the ingestion tool
    #[serde(default)]
    pub images: Vec<String>,
}

impl CatalogRecord {
    /// Build the feature blob for this record.
    ///
    /// Pure and deterministic: the same record always yields the same blob.
    /// Fields are joined in the fixed order with single spaces; absent fields
    /// are already empty strings so the blob never fails to build. Runs once
    /// per record at catalog-load time, never per query.
    pub fn feature_blob(&self) -> String {
        let fields: [&str; FEATURE_FIELD_COUNT] = [
            &self.id,
            &self.cultivar_name,
            &self.accession,
            &self.origin_country,
            &self.origin_province,
            &self.origin_city,
            &self.pedigree,
            &self.genus,
            &self.species,
        ];
        fields.join(" ")
    }
}

/// A catalog record paired with its similarity score for one query.
///
/// `similarity_score` is `1 - cosine distance`, rounded to 3 decimal places
/// and clamped to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CatalogRecord,
    pub similarity_score: f32,
}

/// The structured response for one query.
///
/// Serializes with `mainResult` and `similarResults` keys for the query
/// surface. `similar_results` holds at most `top_n - 1` entries, ordered
/// either by descending score (exact-match branch) or by retrieval order
/// (fallback branch) — see the ranking policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub main_result: ScoredRecord,
    pub similar_results: Vec<ScoredRecord>,
}
