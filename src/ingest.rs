//! Catalog ingestion.
//!
//! Turns a spreadsheet export (JSON array of column → value rows) plus a
//! directory of cultivar photographs into the catalog file the engine loads.
//! Each image filename is matched to a record by extracting a fixed-format
//! accession code — `MAL` followed by 4 or 5 digits, case-insensitive — from
//! the filename stem and comparing it against the row's normalized accession.
//!
//! This tool owns the guarantees the engine depends on: one record per
//! accession, `id` set to the normalized accession, and missing cells
//! normalized to empty strings.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{EngineError, EngineResult};
use crate::types::CatalogRecord;

// MAL followed by 4 or 5 digits, e.g. MAL0100 or MAL12345
static MAL_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(MAL\d{4,5})").unwrap());

/// One raw spreadsheet row: column header → cell value, with blank cells
/// exported as `null`.
pub type RawRow = HashMap<String, Option<String>>;

/// Extract the normalized accession code from an image filename, if present.
///
/// The extension is ignored and the match is case-insensitive; the returned
/// code is lowercased so it compares directly against normalized accessions.
pub fn extract_accession_code(filename: &str) -> Option<String> {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    MAL_CODE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// Collect the image filenames whose embedded code equals `accession`.
pub fn match_images(accession: &str, image_files: &[String]) -> Vec<String> {
    image_files
        .iter()
        .filter(|file| extract_accession_code(file).as_deref() == Some(accession))
        .cloned()
        .collect()
}

/// Build catalog records from raw rows and the available image filenames.
///
/// Rows with a blank accession are skipped. When two rows share an
/// accession, the later row wins and the collision is logged — the catalog
/// contract requires unique ids.
///
/// # Errors
///
/// * `CatalogFile` - no row carries an `accession` column at all, which
///   means the export is from the wrong sheet.
pub fn build_catalog(rows: &[RawRow], image_files: &[String]) -> EngineResult<Vec<CatalogRecord>> {
    if !rows.is_empty() && !rows.iter().any(|row| normalized_row(row).contains_key("accession")) {
        return Err(EngineError::CatalogFile {
            path: "<rows>".to_string(),
            message: "'accession' column not found in export".to_string(),
        });
    }

    let mut records: Vec<CatalogRecord> = Vec::with_capacity(rows.len());
    let mut position_by_id: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let row = normalized_row(row);
        let accession = cell(&row, "accession").to_lowercase();
        if accession.is_empty() {
            continue;
        }

        let record = CatalogRecord {
            id: accession.clone(),
            cultivar_name: cell(&row, "cultivar name"),
            accession: accession.clone(),
            origin_country: cell(&row, "e origin country"),
            origin_province: cell(&row, "e origin province"),
            origin_city: cell(&row, "e origin city"),
            pedigree: cell(&row, "e pedigree"),
            genus: cell(&row, "e genus"),
            species: cell(&row, "e species"),
            images: match_images(&accession, image_files),
        };

        match position_by_id.get(&accession) {
            Some(&position) => {
                tracing::warn!(accession = %accession, "duplicate accession in export, keeping later row");
                records[position] = record;
            }
            None => {
                position_by_id.insert(accession, records.len());
                records.push(record);
            }
        }
    }

    Ok(records)
}

/// Run the full ingestion: rows file + image directory → catalog file.
///
/// Returns the number of records written.
pub fn ingest(rows_path: &Path, images_dir: &Path, output_path: &Path) -> EngineResult<usize> {
    let contents = fs::read_to_string(rows_path).map_err(|e| EngineError::CatalogFile {
        path: rows_path.display().to_string(),
        message: e.to_string(),
    })?;
    let rows: Vec<RawRow> = serde_json::from_str(&contents)?;

    let image_files = list_image_files(images_dir)?;
    let records = build_catalog(&rows, &image_files)?;

    let json = serde_json::to_string_pretty(&records)?;
    fs::write(output_path, json)?;

    tracing::info!(
        records = records.len(),
        images = image_files.len(),
        output = %output_path.display(),
        "catalog ingested"
    );
    Ok(records.len())
}

/// Lowercase-and-trim every column header of a row.
fn normalized_row(row: &RawRow) -> HashMap<String, &Option<String>> {
    row.iter()
        .map(|(key, value)| (key.trim().to_lowercase(), value))
        .collect()
}

/// Read a cell as a trimmed string, treating absent columns and null cells
/// as empty.
fn cell(row: &HashMap<String, &Option<String>>, key: &str) -> String {
    row.get(key)
        .and_then(|value| value.as_deref())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn list_image_files(images_dir: &Path) -> EngineResult<Vec<String>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(images_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    // Directory iteration order is platform-dependent; sort so image lists
    // come out identical across runs.
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn row(pairs: &[(&str, Option<&str>)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(|s| s.to_string())))
            .collect()
    }

    #[test]
    fn test_extract_accession_code() {
        assert_eq!(extract_accession_code("MAL0101_front.jpg"), Some("mal0101".to_string()));
        assert_eq!(extract_accession_code("orchard_mal12345.png"), Some("mal12345".to_string()));
        assert_eq!(extract_accession_code("Mal0042.jpeg"), Some("mal0042".to_string()));
        // Too few digits
        assert_eq!(extract_accession_code("MAL123.jpg"), None);
        assert_eq!(extract_accession_code("unrelated.jpg"), None);
    }

    #[test]
    fn test_match_images_by_code() {
        let files = vec![
            "MAL0101_a.jpg".to_string(),
            "MAL0101_b.jpg".to_string(),
            "MAL0102.jpg".to_string(),
            "notes.txt".to_string(),
        ];

        let matched = match_images("mal0101", &files);
        assert_eq!(matched, vec!["MAL0101_a.jpg", "MAL0101_b.jpg"]);
        assert!(match_images("mal9999", &files).is_empty());
    }

    #[test]
    fn test_build_catalog_normalizes_rows() {
        let rows = vec![row(&[
            ("Accession", Some(" MAL0101 ")),
            ("Cultivar Name", Some("King David")),
            ("E Origin Country", Some("United States")),
            ("E Pedigree", None),
        ])];

        let records = build_catalog(&rows, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "mal0101");
        assert_eq!(records[0].accession, "mal0101");
        assert_eq!(records[0].cultivar_name, "King David");
        assert_eq!(records[0].origin_country, "United States");
        assert_eq!(records[0].pedigree, "");
    }

    #[test]
    fn test_build_catalog_skips_blank_accessions() {
        let rows = vec![
            row(&[("accession", Some("mal0101")), ("cultivar name", Some("Gala"))]),
            row(&[("accession", Some("  ")), ("cultivar name", Some("Ghost"))]),
            row(&[("accession", None), ("cultivar name", Some("Ghost 2"))]),
        ];

        let records = build_catalog(&rows, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cultivar_name, "Gala");
    }

    #[test]
    fn test_build_catalog_duplicate_accession_last_row_wins() {
        let rows = vec![
            row(&[("accession", Some("mal0101")), ("cultivar name", Some("Old Name"))]),
            row(&[("accession", Some("MAL0101")), ("cultivar name", Some("New Name"))]),
        ];

        let records = build_catalog(&rows, &[]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cultivar_name, "New Name");
    }

    #[test]
    fn test_build_catalog_missing_accession_column() {
        let rows = vec![row(&[("cultivar name", Some("Gala"))])];
        let result = build_catalog(&rows, &[]);
        assert!(matches!(result, Err(EngineError::CatalogFile { .. })));
    }

    #[test]
    fn test_ingest_end_to_end() {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let rows_path = dir.path().join("rows.json");
        let images_dir = dir.path().join("images");
        let output_path = dir.path().join("catalog.json");
        fs::create_dir(&images_dir).unwrap();

        File::create(images_dir.join("MAL0101_tree.jpg")).unwrap();
        File::create(images_dir.join("mal0102.png")).unwrap();
        File::create(images_dir.join("unrelated.txt")).unwrap();

        let rows_json = r#"[
            {"Accession": "MAL0101", "Cultivar Name": "King David", "E Genus": "Malus"},
            {"Accession": "MAL0102", "Cultivar Name": "Gala", "E Species": "domestica"}
        ]"#;
        let mut rows_file = File::create(&rows_path).unwrap();
        rows_file.write_all(rows_json.as_bytes()).unwrap();

        let count = ingest(&rows_path, &images_dir, &output_path).unwrap();
        assert_eq!(count, 2);

        // The output must round-trip through the catalog loader
        let records = crate::catalog::load_catalog(&output_path).unwrap();
        assert_eq!(records[0].images, vec!["MAL0101_tree.jpg"]);
        assert_eq!(records[1].images, vec!["mal0102.png"]);
        assert_eq!(records[1].species, "domestica");
    }
}
