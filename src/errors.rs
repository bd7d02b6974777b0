use thiserror::Error;

/// Custom error types for the catalog search engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Empty query: a search query must contain at least one non-whitespace character")]
    EmptyQuery,

    #[error("Empty corpus: cannot fit a vector space over zero catalog records")]
    EmptyCorpus,

    #[error("Insufficient candidates: requested {requested} neighbors but the index only holds {available}")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error("Invalid result count: {top_n} (must be at least 1)")]
    InvalidTopN { top_n: usize },

    #[error("Duplicate record id: {id}")]
    DuplicateId { id: String },

    #[error("Record has an empty id (accession {accession})")]
    EmptyId { accession: String },

    #[error("Catalog file error: {path}: {message}")]
    CatalogFile { path: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {message}")]
    Io { message: String },
}

impl EngineError {
    /// Create a user-friendly error message suitable for a client-facing surface.
    ///
    /// Startup-fatal conditions (empty corpus, bad catalog files) keep their
    /// technical wording; per-query errors are phrased for the person who typed
    /// the query.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::EmptyQuery => {
                "Please enter a search term.".to_string()
            }
            EngineError::EmptyCorpus => {
                "The catalog is empty. Load catalog records before searching.".to_string()
            }
            EngineError::InsufficientCandidates { requested, available } => {
                format!(
                    "Requested {} results but only {} records are indexed.",
                    requested, available
                )
            }
            EngineError::InvalidTopN { top_n } => {
                format!("The requested result count {} is not valid. Ask for at least 1 result.", top_n)
            }
            EngineError::DuplicateId { id } => {
                format!("The catalog contains more than one record with id '{}'.", id)
            }
            EngineError::EmptyId { accession } => {
                format!("A catalog record is missing its id (accession '{}').", accession)
            }
            EngineError::CatalogFile { path, message } => {
                format!("Could not load the catalog from '{}': {}", path, message)
            }
            EngineError::Serialization(e) => {
                format!("Catalog data could not be parsed: {}", e)
            }
            EngineError::Io { message } => {
                format!("File operation failed: {}", message)
            }
        }
    }

    /// True for conditions that must prevent the engine from serving at all.
    ///
    /// Per-query errors are recoverable and get translated into a structured
    /// client error at the query boundary; these are not.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::EmptyCorpus
                | EngineError::DuplicateId { .. }
                | EngineError::EmptyId { .. }
                | EngineError::CatalogFile { .. }
        )
    }
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::Io {
            message: error.to_string(),
        }
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_descriptive() {
        let errors = vec![
            EngineError::EmptyQuery,
            EngineError::EmptyCorpus,
            EngineError::InsufficientCandidates {
                requested: 8,
                available: 3,
            },
            EngineError::InvalidTopN { top_n: 0 },
            EngineError::DuplicateId {
                id: "mal0101".to_string(),
            },
            EngineError::EmptyId {
                accession: "mal0102".to_string(),
            },
            EngineError::CatalogFile {
                path: "/data/catalog.json".to_string(),
                message: "not found".to_string(),
            },
            EngineError::Io {
                message: "disk full".to_string(),
            },
        ];

        for error in errors {
            let user_msg = error.user_message();
            assert!(!user_msg.is_empty());
            assert!(user_msg.len() > 10);
        }
    }

    #[test]
    fn test_startup_fatal_classification() {
        assert!(EngineError::EmptyCorpus.is_startup_fatal());
        assert!(EngineError::DuplicateId { id: "a".into() }.is_startup_fatal());
        assert!(!EngineError::EmptyQuery.is_startup_fatal());
        assert!(!EngineError::InsufficientCandidates {
            requested: 9,
            available: 2
        }
        .is_startup_fatal());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing catalog");
        let engine_error: EngineError = io_error.into();

        match engine_error {
            EngineError::Io { message } => assert!(message.contains("missing catalog")),
            _ => panic!("Wrong error type conversion"),
        }
    }
}
