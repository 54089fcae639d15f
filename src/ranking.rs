//! # Score Combination Module
//!
//! ## Purpose
//! Blends text similarity with normalized auxiliary attributes (rating,
//! experience) into one ranking score, applies hard preference filters, and
//! produces an ordered, truncated result list.
//!
//! ## Input/Output Specification
//! - **Input**: Candidate population, per-candidate similarity, preferences
//! - **Output**: Top-N candidates ordered by descending combined score
//! - **Policy**: Fixed 0.5/0.3/0.2 weights; ties broken by load order
//!
//! Attribute normalization is min-max over the *current* population. An
//! update to one candidate's attribute invalidates the scalers for all
//! candidates, so callers refit them on every population change.

use crate::{Candidate, CandidateId, Preferences};
use serde::Serialize;

/// Weight of text similarity in the combined score.
pub const SIMILARITY_WEIGHT: f32 = 0.5;
/// Weight of the min-max normalized rating.
pub const RATING_WEIGHT: f32 = 0.3;
/// Weight of the min-max normalized experience.
pub const EXPERIENCE_WEIGHT: f32 = 0.2;
/// Result count used when the caller does not supply one.
pub const DEFAULT_TOP_N: usize = 3;

/// Min-max scaler over a numeric attribute of the candidate population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxScaler {
    min: f32,
    max: f32,
}

impl MinMaxScaler {
    /// Fit over the raw attribute values of the current population.
    pub fn fit(values: &[f32]) -> Self {
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if values.is_empty() {
            Self { min: 0.0, max: 0.0 }
        } else {
            Self { min, max }
        }
    }

    /// Rescale a raw value into [0, 1] relative to the fitted population.
    ///
    /// Degenerate zero-range populations (all values equal, or an empty fit)
    /// normalize every member to 0.0. That policy keeps the maximum-equals-1
    /// and minimum-equals-0 properties vacuously consistent.
    pub fn transform(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }
}

/// A candidate with its similarity and combined ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub id: CandidateId,
    pub full_name: String,
    pub specialty: String,
    pub experience_years: u32,
    pub rating: f32,
    /// Cosine similarity between the case text and the specialty text
    pub similarity_score: f32,
    /// Weighted blend of similarity, rating, and experience
    pub overall_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Weighted sum of similarity and normalized attributes.
pub fn combine(similarity: f32, normalized_rating: f32, normalized_experience: f32) -> f32 {
    SIMILARITY_WEIGHT * similarity
        + RATING_WEIGHT * normalized_rating
        + EXPERIENCE_WEIGHT * normalized_experience
}

/// Filter, score, order, and truncate the candidate population.
///
/// `similarities` is positionally aligned with `candidates`. Hard filters
/// (availability, preference thresholds) exclude candidates before scoring.
/// The sort is stable and descending, so equal scores keep load order.
pub fn rank(
    candidates: &[Candidate],
    similarities: &[f32],
    preferences: &Preferences,
    rating_scaler: &MinMaxScaler,
    experience_scaler: &MinMaxScaler,
    top_n: usize,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .zip(similarities)
        .filter(|(candidate, _)| passes_filters(candidate, preferences))
        .map(|(candidate, &similarity)| {
            let overall = combine(
                similarity,
                rating_scaler.transform(candidate.rating),
                experience_scaler.transform(candidate.experience_years as f32),
            );
            RankedCandidate {
                id: candidate.id,
                full_name: candidate.full_name.clone(),
                specialty: candidate.specialty.clone(),
                experience_years: candidate.experience_years,
                rating: candidate.rating,
                similarity_score: similarity,
                overall_score: overall,
                avatar_url: candidate.avatar_url.clone(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    ranked
}

fn passes_filters(candidate: &Candidate, preferences: &Preferences) -> bool {
    if !candidate.available {
        return false;
    }
    if let Some(min_experience) = preferences.preferred_experience {
        if candidate.experience_years < min_experience {
            return false;
        }
    }
    if let Some(min_rating) = preferences.preferred_rating {
        if candidate.rating < min_rating {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: CandidateId, experience: u32, rating: f32, available: bool) -> Candidate {
        Candidate {
            id,
            full_name: format!("Abogado {id}"),
            specialty: "Derecho General".to_string(),
            experience_years: experience,
            rating,
            available,
            avatar_url: None,
        }
    }

    #[test]
    fn test_min_max_endpoints() {
        let scaler = MinMaxScaler::fit(&[4.7, 4.9, 4.8]);
        assert_eq!(scaler.transform(4.9), 1.0);
        assert_eq!(scaler.transform(4.7), 0.0);
        let mid = scaler.transform(4.8);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_min_max_zero_range_normalizes_to_zero() {
        let scaler = MinMaxScaler::fit(&[4.5, 4.5, 4.5]);
        assert_eq!(scaler.transform(4.5), 0.0);

        let empty = MinMaxScaler::fit(&[]);
        assert_eq!(empty.transform(1.0), 0.0);
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((SIMILARITY_WEIGHT + RATING_WEIGHT + EXPERIENCE_WEIGHT - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unavailable_candidates_excluded() {
        let population = vec![
            candidate(1, 10, 4.5, true),
            candidate(2, 20, 5.0, false),
        ];
        let scaler = MinMaxScaler::fit(&[4.5, 5.0]);
        let exp_scaler = MinMaxScaler::fit(&[10.0, 20.0]);
        let ranked = rank(
            &population,
            &[0.9, 0.9],
            &Preferences::default(),
            &scaler,
            &exp_scaler,
            DEFAULT_TOP_N,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, 1);
    }

    #[test]
    fn test_experience_filter_yields_subset() {
        let population = vec![
            candidate(1, 5, 4.0, true),
            candidate(2, 12, 4.2, true),
            candidate(3, 15, 4.8, true),
        ];
        let similarities = [0.3, 0.4, 0.2];
        let rating_scaler = MinMaxScaler::fit(&[4.0, 4.2, 4.8]);
        let exp_scaler = MinMaxScaler::fit(&[5.0, 12.0, 15.0]);

        let unfiltered = rank(
            &population,
            &similarities,
            &Preferences::default(),
            &rating_scaler,
            &exp_scaler,
            10,
        );
        let filtered = rank(
            &population,
            &similarities,
            &Preferences {
                preferred_experience: Some(10),
                preferred_rating: None,
            },
            &rating_scaler,
            &exp_scaler,
            10,
        );

        assert!(filtered.iter().all(|r| r.experience_years >= 10));
        let unfiltered_ids: Vec<_> = unfiltered.iter().map(|r| r.id).collect();
        assert!(filtered.iter().all(|r| unfiltered_ids.contains(&r.id)));
    }

    #[test]
    fn test_descending_order_and_truncation() {
        let population: Vec<Candidate> = (1..=5)
            .map(|id| candidate(id, 10 + id as u32, 4.0, true))
            .collect();
        let similarities = [0.1, 0.9, 0.5, 0.7, 0.3];
        let rating_scaler = MinMaxScaler::fit(&[4.0; 5]);
        let exp_scaler = MinMaxScaler::fit(&[11.0, 12.0, 13.0, 14.0, 15.0]);

        let ranked = rank(
            &population,
            &similarities,
            &Preferences::default(),
            &rating_scaler,
            &exp_scaler,
            3,
        );
        assert_eq!(ranked.len(), 3);
        assert!(ranked[0].overall_score >= ranked[1].overall_score);
        assert!(ranked[1].overall_score >= ranked[2].overall_score);
        assert_eq!(ranked[0].id, 2);
    }

    #[test]
    fn test_ties_keep_load_order() {
        let population = vec![
            candidate(7, 10, 4.5, true),
            candidate(8, 10, 4.5, true),
            candidate(9, 10, 4.5, true),
        ];
        // Identical attributes and similarity: everything ties
        let rating_scaler = MinMaxScaler::fit(&[4.5; 3]);
        let exp_scaler = MinMaxScaler::fit(&[10.0; 3]);
        let ranked = rank(
            &population,
            &[0.5, 0.5, 0.5],
            &Preferences::default(),
            &rating_scaler,
            &exp_scaler,
            3,
        );
        let ids: Vec<_> = ranked.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }
}
