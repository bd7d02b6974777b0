//! TF-IDF vector space model over catalog feature blobs.
//!
//! The vocabulary and document-frequency statistics are fit exactly once from
//! the full corpus at startup and frozen afterwards. Query strings are always
//! projected through the frozen vocabulary; unknown terms contribute zero
//! weight instead of failing. All vectors are L2-normalized at construction so
//! cosine similarity downstream reduces to a sparse dot product.
//!
//! ## Weighting scheme
//!
//! - **TF**: raw term count within one document.
//! - **IDF**: smoothed inverse document frequency,
//!   `ln((1 + n_docs) / (1 + df)) + 1`, so terms present in every document
//!   still get a positive weight and unseen terms cannot divide by zero.
//! - **Normalization**: each vector is scaled to unit L2 norm, which makes
//!   the dot product of two vectors equal their cosine similarity.

use std::collections::HashMap;

use crate::errors::{EngineError, EngineResult};
use crate::text_processing::tokenize;

/// A sparse vector in the fitted term space.
///
/// Stored as `(dimension, weight)` pairs sorted by dimension index, which
/// keeps the dot product a single linear merge. Weights are non-negative
/// TF-IDF values; a vector may be empty (e.g. a query made entirely of
/// out-of-vocabulary terms).
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Build a sparse vector from unsorted `(dimension, weight)` pairs.
    ///
    /// Zero weights are dropped; remaining entries are sorted by dimension.
    pub fn from_entries(mut entries: Vec<(usize, f32)>) -> Self {
        entries.retain(|&(_, w)| w != 0.0);
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        Self { entries }
    }

    /// The zero vector.
    pub fn zero() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero dimensions.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product with another sparse vector via linear merge.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (dim_a, val_a) = self.entries[i];
            let (dim_b, val_b) = other.entries[j];
            match dim_a.cmp(&dim_b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += val_a * val_b;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt()
    }

    /// Scale to unit norm in place. The zero vector is left untouched: it has
    /// no direction, and downstream distance handling treats it as maximally
    /// far from everything.
    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for entry in &mut self.entries {
                entry.1 /= norm;
            }
        }
    }
}

/// Frozen TF-IDF vocabulary and weighting statistics.
///
/// Created once at startup from the full catalog snapshot and read-only
/// afterwards; [`TfidfVectorizer::transform`] takes `&self` and holds no
/// mutable state, so arbitrarily many concurrent callers may project queries
/// through the same model.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term -> dimension index, assigned in lexicographic term order
    vocabulary: HashMap<String, usize>,
    /// per-dimension smoothed inverse document frequency
    idf: Vec<f32>,
    /// corpus size the model was fit over
    num_documents: usize,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF statistics from the corpus of feature blobs.
    ///
    /// Deterministic given the same blob sequence and stop-word list:
    /// dimension indices are assigned in lexicographic term order, not
    /// first-seen order.
    ///
    /// # Errors
    ///
    /// * `EmptyCorpus` - if `blobs` is empty; a vocabulary cannot be built
    ///   from zero documents and this condition is startup-fatal.
    pub fn fit(blobs: &[String]) -> EngineResult<Self> {
        if blobs.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        // Document frequency per term over the whole corpus
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for blob in blobs {
            let mut tokens = tokenize(blob);
            tokens.sort_unstable();
            tokens.dedup();
            for term in tokens {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        // Lexicographic dimension assignment keeps fitting order-independent
        // of HashMap iteration order.
        let mut terms: Vec<String> = document_frequency.keys().cloned().collect();
        terms.sort_unstable();

        let num_documents = blobs.len();
        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());

        for (dim, term) in terms.into_iter().enumerate() {
            let df = document_frequency[&term];
            let weight = ((1.0 + num_documents as f32) / (1.0 + df as f32)).ln() + 1.0;
            vocabulary.insert(term, dim);
            idf.push(weight);
        }

        tracing::debug!(
            documents = num_documents,
            vocabulary = vocabulary.len(),
            "fitted tf-idf model"
        );

        Ok(Self {
            vocabulary,
            idf,
            num_documents,
        })
    }

    /// Project one string into the frozen vector space.
    ///
    /// Never fails: out-of-vocabulary terms are simply dropped, and a text
    /// with no known terms maps to the zero vector. The result is
    /// L2-normalized.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut term_counts: HashMap<usize, f32> = HashMap::new();
        for term in tokenize(text) {
            if let Some(&dim) = self.vocabulary.get(&term) {
                *term_counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let entries = term_counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim]))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }

    /// Number of dimensions in the fitted space.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the model was fit over.
    pub fn corpus_size(&self) -> usize {
        self.num_documents
    }
}
