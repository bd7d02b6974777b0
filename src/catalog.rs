//! Catalog loading.
//!
//! The engine consumes a catalog as a JSON array of records — the output
//! contract of the ingestion tool. The loader enforces the contract the rest
//! of the engine relies on: every record has a unique, non-empty `id`, and
//! every text field arrives trimmed, with absent values already normalized to
//! empty strings by serde defaults.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{EngineError, EngineResult};
use crate::types::CatalogRecord;

/// Load and validate a catalog file.
///
/// # Errors
///
/// * `CatalogFile` - the file cannot be read.
/// * `Serialization` - the file is not a JSON array of records.
/// * `EmptyId` / `DuplicateId` - the id-uniqueness contract is violated;
///   both are startup-fatal.
pub fn load_catalog(path: &Path) -> EngineResult<Vec<CatalogRecord>> {
    let contents = fs::read_to_string(path).map_err(|e| EngineError::CatalogFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut records: Vec<CatalogRecord> = serde_json::from_str(&contents)?;

    let mut seen_ids: HashSet<String> = HashSet::with_capacity(records.len());
    for record in &mut records {
        normalize_record(record);

        if record.id.is_empty() {
            return Err(EngineError::EmptyId {
                accession: record.accession.clone(),
            });
        }
        if !seen_ids.insert(record.id.clone()) {
            return Err(EngineError::DuplicateId {
                id: record.id.clone(),
            });
        }
    }

    tracing::info!(records = records.len(), path = %path.display(), "loaded catalog");
    Ok(records)
}

/// Trim surrounding whitespace on every text field of a record.
fn normalize_record(record: &mut CatalogRecord) {
    for field in [
        &mut record.id,
        &mut record.cultivar_name,
        &mut record.accession,
        &mut record.origin_country,
        &mut record.origin_province,
        &mut record.origin_city,
        &mut record.pedigree,
        &mut record.genus,
        &mut record.species,
    ] {
        let trimmed = field.trim().to_string();
        if trimmed.len() != field.len() {
            *field = trimmed;
        }
    }
}
