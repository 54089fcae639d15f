//! # Legal Matching Engine
//!
//! ## Overview
//! This library implements a similarity-based matching and ranking engine for
//! legal advisory services aimed at people with motor disabilities. One design
//! backs two instantiations: a topic classifier that maps a free-text query to
//! a fixed legal taxonomy (to pick a canned response), and a candidate ranker
//! that orders lawyer profiles or prior questions against a case description.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `text`: Normalization, tokenization, and Spanish stop-word filtering
//! - `keyword`: Keyword-overlap similarity between query and topic
//! - `vector`: TF-IDF vector space and cosine similarity over a corpus
//! - `ranking`: Min-max attribute normalization and weighted score blending
//! - `topics`: The fixed legal topic taxonomy with canned responses
//! - `classifier`: Confidence-thresholded topic classification
//! - `recommender`: Lawyer ranking and related-question recommendation
//! - `store`: Embedded candidate storage with a built-in fallback set
//! - `api`: JSON request/response framing
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: Free-text queries (Spanish), optional structured preferences
//! - **Output**: Classified topic with response text, or ranked candidates
//! - **Determinism**: Scoring and ranking are deterministic; randomness is
//!   confined to response-text selection and is seedable for tests
//!
//! ## Usage
//! ```rust,no_run
//! use legal_match::{store, Preferences, Recommender};
//!
//! let recommender = Recommender::new(store::fallback_candidates());
//! let results = recommender.recommend(
//!     "discriminación laboral por discapacidad motriz",
//!     &Preferences::default(),
//!     3,
//! );
//! println!("Found {} recommendations", results.len());
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod text;
pub mod keyword;
pub mod vector;
pub mod ranking;
pub mod topics;
pub mod classifier;
pub mod recommender;
pub mod store;
pub mod api;

// Utilities
pub mod utils;

// Re-exports for convenience
pub use classifier::{Classifier, CONFIDENCE_THRESHOLD};
pub use config::Config;
pub use errors::{MatchError, Result};
pub use recommender::Recommender;

use serde::{Deserialize, Serialize};

/// Unique identifier for candidate lawyers, matching the integer keys of the
/// backing store.
pub type CandidateId = i64;

/// A rankable candidate: a lawyer profile scored against a case description.
///
/// Treated as read-only within a single ranking pass; any attribute update
/// invalidates the derived normalization for the whole population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique candidate identifier
    pub id: CandidateId,
    /// Display name
    pub full_name: String,
    /// Descriptive text matched against the case description
    pub specialty: String,
    /// Years of professional experience
    pub experience_years: u32,
    /// Client rating in [0, 5]
    pub rating: f32,
    /// Whether the candidate currently accepts cases
    pub available: bool,
    /// Optional profile picture URL. Always encoded, never skipped: the
    /// store's bincode format is not self-describing, so a skipped field
    /// cannot be read back.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Caller-supplied hard preference filters for the candidate ranker.
///
/// Candidates below either threshold are excluded entirely, never
/// down-weighted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Minimum years of experience
    #[serde(default)]
    pub preferred_experience: Option<u32>,
    /// Minimum rating, in [0, 5]
    #[serde(default)]
    pub preferred_rating: Option<f32>,
}

impl Preferences {
    /// Validate preference ranges. Experience is non-negative by type; the
    /// rating threshold must fall inside the rating scale.
    pub fn validate(&self) -> Result<()> {
        if let Some(rating) = self.preferred_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(MatchError::InvalidRequest {
                    details: format!("preferred_rating must be in [0, 5], got {rating}"),
                });
            }
        }
        Ok(())
    }
}
