//! # Candidate Recommendation Module
//!
//! ## Purpose
//! Ranks candidate lawyers against a case description, and recommends related
//! prior questions from a user's per-category history.
//!
//! ## Input/Output Specification
//! - **Input**: Case description text, hard preference filters, top-N count
//! - **Output**: Ordered candidates with similarity and combined scores
//! - **Invariant**: Derived state (vector space, min-max scalers) is rebuilt
//!   synchronously on every population mutation, before the next score
//!
//! Scoring is read-only over the population and safe to run concurrently;
//! mutation takes the write side of the lock and excludes scoring until the
//! rebuilt state is in place. Nothing suspends and no I/O happens inside the
//! scoring path.

use crate::errors::{MatchError, Result};
use crate::ranking::{self, MinMaxScaler, RankedCandidate};
use crate::store::CandidateStore;
use crate::text;
use crate::utils::TextUtils;
use crate::vector::TfidfModel;
use crate::{Candidate, CandidateId, Preferences};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Candidate ranking engine.
///
/// Owns the candidate population together with the TF-IDF model over the
/// specialty texts and the attribute scalers derived from it. All three are
/// kept consistent behind one reader/writer lock.
pub struct Recommender {
    state: RwLock<EngineState>,
}

struct EngineState {
    candidates: Vec<Candidate>,
    model: TfidfModel,
    rating_scaler: MinMaxScaler,
    experience_scaler: MinMaxScaler,
}

impl EngineState {
    fn build(candidates: Vec<Candidate>) -> Self {
        let corpus: Vec<&str> = candidates
            .iter()
            .map(|c| c.specialty.as_str())
            .collect();
        let model = TfidfModel::fit(&corpus);
        let (rating_scaler, experience_scaler) = fit_scalers(&candidates);
        Self {
            candidates,
            model,
            rating_scaler,
            experience_scaler,
        }
    }

    fn refit_scalers(&mut self) {
        let (rating, experience) = fit_scalers(&self.candidates);
        self.rating_scaler = rating;
        self.experience_scaler = experience;
    }
}

/// Scalers are fitted over the available candidates only, since those are the
/// ones that can appear in a result.
fn fit_scalers(candidates: &[Candidate]) -> (MinMaxScaler, MinMaxScaler) {
    let ratings: Vec<f32> = candidates
        .iter()
        .filter(|c| c.available)
        .map(|c| c.rating)
        .collect();
    let experience: Vec<f32> = candidates
        .iter()
        .filter(|c| c.available)
        .map(|c| c.experience_years as f32)
        .collect();
    (MinMaxScaler::fit(&ratings), MinMaxScaler::fit(&experience))
}

impl Recommender {
    /// Build the engine over a candidate population. The population order is
    /// preserved and serves as the deterministic tie-break in rankings.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        tracing::info!(candidates = candidates.len(), "recommender initialized");
        Self {
            state: RwLock::new(EngineState::build(candidates)),
        }
    }

    /// Rank candidates against a case description.
    ///
    /// An empty or zero-signal case description yields an empty list, per the
    /// input-error policy: no signal means no recommendation, not a failure.
    pub fn recommend(
        &self,
        case_description: &str,
        preferences: &Preferences,
        top_n: usize,
    ) -> Vec<RankedCandidate> {
        if text::content_tokens(case_description).is_empty() {
            tracing::debug!("zero-signal case description, returning no recommendations");
            return Vec::new();
        }

        let state = self.state.read();
        if state.candidates.is_empty() {
            return Vec::new();
        }

        let similarities = state.model.similarities(case_description);
        let ranked = ranking::rank(
            &state.candidates,
            &similarities,
            preferences,
            &state.rating_scaler,
            &state.experience_scaler,
            top_n,
        );

        tracing::debug!(
            case = %TextUtils::truncate(case_description, 60),
            results = ranked.len(),
            "ranked candidates"
        );
        ranked
    }

    /// Number of candidates in the population.
    pub fn candidate_count(&self) -> usize {
        self.state.read().candidates.len()
    }

    /// Snapshot of the current population, in load order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.state.read().candidates.clone()
    }

    /// Update one candidate's rating, averaging it with the prior value.
    ///
    /// Returns the new rating. With a store the updated record is persisted
    /// in the same operation, while the write lock is held, so the engine
    /// and the database never disagree; a storage failure leaves the engine
    /// unchanged. The min-max normalization is recomputed for the whole
    /// population before the lock is released: one changed rating shifts
    /// every candidate's normalized value. The vector space is untouched
    /// because the descriptive text did not change.
    pub fn update_rating(
        &self,
        id: CandidateId,
        new_rating: f32,
        store: Option<&CandidateStore>,
    ) -> Result<f32> {
        if !(0.0..=5.0).contains(&new_rating) {
            return Err(MatchError::InvalidRequest {
                details: format!("rating must be in [0, 5], got {new_rating}"),
            });
        }

        let mut state = self.state.write();
        let index = state
            .candidates
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| MatchError::InvalidRequest {
                details: format!("unknown candidate id {id}"),
            })?;

        let mut updated = state.candidates[index].clone();
        updated.rating = (updated.rating + new_rating) / 2.0;
        let rating = updated.rating;

        if let Some(store) = store {
            store.put_candidates(std::slice::from_ref(&updated))?;
        }

        state.candidates[index] = updated;
        state.refit_scalers();

        tracing::info!(candidate = id, rating, "rating updated");
        Ok(rating)
    }

    /// Replace the candidate population and rebuild all derived state.
    pub fn refresh(&self, candidates: Vec<Candidate>) {
        let mut state = self.state.write();
        *state = EngineState::build(candidates);
        tracing::info!(candidates = state.candidates.len(), "population refreshed");
    }
}

/// A prior question from the user's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuestion {
    pub question: String,
    pub category: String,
}

/// A related question recommended from the history.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionRecommendation {
    pub question: String,
    pub category: String,
    pub similarity: f32,
}

const RELATED_PER_CATEGORY: usize = 2;

/// Recommend questions related to the most recent one in each category.
///
/// Questions are grouped by category in first-seen order. A category with
/// fewer than two questions has no similarity pair and is skipped; partial
/// results are valid results. Within a category, the latest question is
/// scored against the earlier ones and the best two survive. The merged list
/// is ordered by similarity descending and truncated to `top_n`.
pub fn recommend_questions(history: &[UserQuestion], top_n: usize) -> Vec<QuestionRecommendation> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for entry in history {
        match groups.iter_mut().find(|(cat, _)| *cat == entry.category) {
            Some((_, questions)) => questions.push(&entry.question),
            None => groups.push((&entry.category, vec![&entry.question])),
        }
    }

    let mut recommendations = Vec::new();
    for (category, questions) in &groups {
        if questions.len() < 2 {
            tracing::debug!(category, "skipping category with a single question");
            continue;
        }

        let model = TfidfModel::fit(questions);
        let latest = questions.len() - 1;
        let similarities = model.similarities(questions[latest]);

        let mut scored: Vec<(usize, f32)> = similarities[..latest]
            .iter()
            .copied()
            .enumerate()
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        for (index, similarity) in scored.into_iter().take(RELATED_PER_CATEGORY) {
            recommendations.push(QuestionRecommendation {
                question: questions[index].to_string(),
                category: category.to_string(),
                similarity,
            });
        }
    }

    recommendations.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    recommendations.truncate(top_n);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fallback_candidates;

    fn case_text() -> &'static str {
        "Necesito ayuda con una reclamación por discriminación en mi trabajo. \
         Me negaron adaptaciones razonables para mi discapacidad motriz."
    }

    #[test]
    fn test_lawyer_scenario_with_preferences() {
        let recommender = Recommender::new(fallback_candidates());
        let preferences = Preferences {
            preferred_experience: Some(10),
            preferred_rating: Some(4.5),
        };
        let results = recommender.recommend(case_text(), &preferences, 3);

        assert!(!results.is_empty());
        assert!(results.len() <= 3);
        for result in &results {
            assert!(result.experience_years >= 10);
            assert!(result.rating >= 4.5);
        }
        for pair in results.windows(2) {
            assert!(pair[0].overall_score >= pair[1].overall_score);
        }
    }

    #[test]
    fn test_labor_specialist_ranks_first() {
        let recommender = Recommender::new(fallback_candidates());
        let results = recommender.recommend(case_text(), &Preferences::default(), 3);
        // Dr. Rodríguez covers labor law, disability, and discrimination
        assert_eq!(results[0].id, 2);
        assert!(results[0].similarity_score > 0.0);
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let recommender = Recommender::new(fallback_candidates());
        let first = recommender.recommend(case_text(), &Preferences::default(), 5);
        let second = recommender.recommend(case_text(), &Preferences::default(), 5);
        let firsts: Vec<_> = first.iter().map(|r| (r.id, r.overall_score)).collect();
        let seconds: Vec<_> = second.iter().map(|r| (r.id, r.overall_score)).collect();
        assert_eq!(firsts, seconds);
    }

    #[test]
    fn test_empty_case_description_yields_no_results() {
        let recommender = Recommender::new(fallback_candidates());
        assert!(recommender
            .recommend("", &Preferences::default(), 3)
            .is_empty());
        assert!(recommender
            .recommend("   ", &Preferences::default(), 3)
            .is_empty());
    }

    #[test]
    fn test_update_rating_averages_and_renormalizes() {
        let recommender = Recommender::new(fallback_candidates());
        let before = recommender.candidates();
        let target = before.iter().find(|c| c.id == 4).unwrap().rating;

        let updated = recommender.update_rating(4, 5.0, None).unwrap();
        assert!((updated - (target + 5.0) / 2.0).abs() < 1e-6);

        // A fresh ranking reflects the new normalization immediately
        let results = recommender.recommend("pensiones seguridad social", &Preferences::default(), 5);
        let entry = results.iter().find(|r| r.id == 4).unwrap();
        assert!((entry.rating - updated).abs() < 1e-6);
    }

    #[test]
    fn test_update_rating_rejects_out_of_range() {
        let recommender = Recommender::new(fallback_candidates());
        assert!(recommender.update_rating(1, 6.0, None).is_err());
        assert!(recommender.update_rating(1, -0.5, None).is_err());
        assert!(recommender.update_rating(999, 4.0, None).is_err());
    }

    #[test]
    fn test_update_rating_writes_through_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = CandidateStore::open(dir.path().join("db")).unwrap();
        store.put_candidates(&fallback_candidates()).unwrap();

        let recommender = Recommender::new(store.load_candidates().unwrap());
        let updated = recommender.update_rating(4, 5.0, Some(&store)).unwrap();

        // The persisted record carries the value the engine is serving
        let reloaded = store.load_candidates().unwrap();
        let record = reloaded.iter().find(|c| c.id == 4).unwrap();
        assert!((record.rating - updated).abs() < 1e-6);

        // A restarted engine built from the store serves the same value
        let restarted = Recommender::new(reloaded);
        let snapshot = restarted.candidates();
        let survivor = snapshot.iter().find(|c| c.id == 4).unwrap();
        assert!((survivor.rating - updated).abs() < 1e-6);
    }

    #[test]
    fn test_refresh_rebuilds_model() {
        let recommender = Recommender::new(fallback_candidates());
        recommender.refresh(vec![Candidate {
            id: 50,
            full_name: "Dra. Prueba".to_string(),
            specialty: "Derecho Espacial".to_string(),
            experience_years: 3,
            rating: 4.0,
            available: true,
            avatar_url: None,
        }]);
        assert_eq!(recommender.candidate_count(), 1);
        let results = recommender.recommend("derecho espacial", &Preferences::default(), 3);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 50);
    }

    fn question(text: &str, category: &str) -> UserQuestion {
        UserQuestion {
            question: text.to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn test_question_recommendations_skip_single_question_categories() {
        let history = vec![
            question("¿Cómo solicito pensión por invalidez?", "pensiones"),
            question("¿Qué documentos necesito para la pensión?", "pensiones"),
            question("¿Cómo denuncio barreras arquitectónicas?", "accesibilidad"),
        ];
        let recommendations = recommend_questions(&history, 3);
        assert!(recommendations
            .iter()
            .all(|r| r.category == "pensiones"));
        assert_eq!(recommendations.len(), 1);
    }

    #[test]
    fn test_question_recommendations_are_capped_and_ordered() {
        let history = vec![
            question("¿Cómo solicito pensión por invalidez?", "pensiones"),
            question("¿Qué documentos piden para pensión de invalidez?", "pensiones"),
            question("Pensión de invalidez: ¿cuánto tarda el trámite?", "pensiones"),
            question("¿Puedo reclamar por discriminación laboral?", "laboral"),
            question("Me negaron adaptaciones en mi trabajo, ¿qué hago?", "laboral"),
            question("Despido por discapacidad, ¿es discriminación laboral?", "laboral"),
        ];
        let recommendations = recommend_questions(&history, 3);
        assert!(recommendations.len() <= 3);
        for pair in recommendations.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_empty_history_yields_no_recommendations() {
        assert!(recommend_questions(&[], 3).is_empty());
    }
}
