//! # Vector Similarity Module
//!
//! ## Purpose
//! TF-IDF weighted vector space over a candidate corpus with cosine
//! similarity between a query projection and each corpus document.
//!
//! ## Input/Output Specification
//! - **Input**: Ordered corpus of document texts; query text
//! - **Output**: One similarity float in [0, 1] per corpus document
//! - **Weighting**: Term frequency scaled by smoothed inverse document
//!   frequency, `ln((1 + n) / (1 + df)) + 1`
//!
//! Query terms unseen in the corpus contribute zero weight; that is expected
//! and never an error. The model must be rebuilt whenever the corpus changes:
//! scoring against a stale vector space silently produces wrong similarities
//! and is a correctness bug, not a performance concern.

use crate::text;
use std::collections::HashMap;

/// TF-IDF vector space fitted over an ordered corpus.
///
/// Document vectors are stored L2-normalized, so cosine similarity reduces to
/// a dot product.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    /// term -> dimension index, assigned in first-seen corpus order
    vocabulary: HashMap<String, usize>,
    /// Smoothed IDF weight per dimension
    idf: Vec<f32>,
    /// Unit-length document vectors, one per corpus document
    doc_vectors: Vec<Vec<f32>>,
}

impl TfidfModel {
    /// Fit a vector space over the corpus. Document order is preserved: the
    /// i-th similarity returned by [`similarities`](Self::similarities)
    /// corresponds to the i-th corpus document.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = corpus
            .iter()
            .map(|doc| text::content_tokens(doc.as_ref()))
            .collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for tokens in &tokenized {
            let mut seen_in_doc = std::collections::HashSet::new();
            for token in tokens {
                if !vocabulary.contains_key(token) {
                    vocabulary.insert(token.clone(), vocabulary.len());
                    doc_freq.push(0);
                }
                if seen_in_doc.insert(token.as_str()) {
                    doc_freq[vocabulary[token]] += 1;
                }
            }
        }

        let n = corpus.len() as f32;
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| weighted_vector(tokens, &vocabulary, &idf))
            .collect();

        tracing::debug!(
            documents = corpus.len(),
            vocabulary = vocabulary.len(),
            "fitted tf-idf model"
        );

        Self {
            vocabulary,
            idf,
            doc_vectors,
        }
    }

    /// Number of corpus documents the model was fitted over.
    pub fn len(&self) -> usize {
        self.doc_vectors.len()
    }

    /// True when the model was fitted over an empty corpus.
    pub fn is_empty(&self) -> bool {
        self.doc_vectors.is_empty()
    }

    /// Number of distinct terms across the corpus.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Cosine similarity between the query and every corpus document, in
    /// corpus order. A query with no corpus terms (or an empty query) yields
    /// 0.0 everywhere.
    pub fn similarities(&self, query: &str) -> Vec<f32> {
        let tokens = text::content_tokens(query);
        let query_vector = weighted_vector(&tokens, &self.vocabulary, &self.idf);

        self.doc_vectors
            .iter()
            .map(|doc| dot(&query_vector, doc))
            .collect()
    }
}

/// Build a unit-length TF-IDF vector for the token multiset. Tokens outside
/// the vocabulary are ignored. A vector with zero magnitude stays all-zero,
/// which makes every cosine against it 0.0.
fn weighted_vector(tokens: &[String], vocabulary: &HashMap<String, usize>, idf: &[f32]) -> Vec<f32> {
    let mut vector = vec![0.0_f32; idf.len()];
    for token in tokens {
        if let Some(&index) = vocabulary.get(token) {
            vector[index] += 1.0;
        }
    }
    for (weight, &idf_value) in vector.iter_mut().zip(idf) {
        *weight *= idf_value;
    }

    let norm = vector.iter().map(|w| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for weight in &mut vector {
            *weight /= norm;
        }
    }
    vector
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
