//! # Candidate Storage Module
//!
//! ## Purpose
//! Persists the candidate population in an embedded sled database and keeps a
//! built-in fallback population for when the database is missing or empty.
//!
//! ## Input/Output Specification
//! - **Input**: Candidate records keyed by id
//! - **Output**: The population in ascending id order
//! - **Storage**: bincode-serialized values under big-endian id keys

use crate::errors::{MatchError, Result};
use crate::{Candidate, CandidateId};
use std::path::Path;

const CANDIDATE_TREE: &str = "candidates";

/// Embedded candidate store.
///
/// Keys are big-endian encoded ids so a tree scan yields the population in
/// ascending id order, which is the ranking tie-break order.
pub struct CandidateStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl CandidateStore {
    /// Open (or create) the store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(|e| MatchError::DataUnavailable {
            store: path.display().to_string(),
            details: e.to_string(),
        })?;
        let tree = db.open_tree(CANDIDATE_TREE)?;
        tracing::info!(path = %path.display(), records = tree.len(), "candidate store opened");
        Ok(Self { db, tree })
    }

    /// Load the whole population in ascending id order.
    pub fn load_candidates(&self) -> Result<Vec<Candidate>> {
        let mut candidates = Vec::with_capacity(self.tree.len());
        for entry in self.tree.iter() {
            let (_, value) = entry?;
            let candidate: Candidate = bincode::deserialize(&value)?;
            candidates.push(candidate);
        }
        Ok(candidates)
    }

    /// Insert or replace a single candidate.
    pub fn put_candidate(&self, candidate: &Candidate) -> Result<()> {
        let value = bincode::serialize(candidate)?;
        self.tree.insert(candidate.id.to_be_bytes(), value)?;
        Ok(())
    }

    /// Insert or replace a batch of candidates and flush to disk.
    pub fn put_candidates(&self, candidates: &[Candidate]) -> Result<()> {
        for candidate in candidates {
            self.put_candidate(candidate)?;
        }
        self.db.flush()?;
        tracing::debug!(count = candidates.len(), "candidates persisted");
        Ok(())
    }

    /// Number of stored candidates.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the store holds no candidates.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Built-in population used when no database is available.
pub fn fallback_candidates() -> Vec<Candidate> {
    let records: [(CandidateId, &str, &str, u32, f32); 5] = [
        (
            1,
            "Dra. María González",
            "Derechos de Discapacidad, Accesibilidad, Inclusión",
            15,
            4.9,
        ),
        (
            2,
            "Dr. Carlos Rodríguez",
            "Derecho Laboral, Discapacidad, Discriminación",
            12,
            4.8,
        ),
        (
            3,
            "Dra. Ana Martínez",
            "Derecho Civil, Herencias, Testamentos, Patrimonio Protegido",
            18,
            4.9,
        ),
        (
            4,
            "Dr. Javier López",
            "Pensiones, Seguridad Social, Incapacidad Laboral",
            10,
            4.7,
        ),
        (
            5,
            "Dra. Laura Sánchez",
            "Accesibilidad, Derechos Humanos, Litigios",
            14,
            4.8,
        ),
    ];

    records
        .into_iter()
        .map(|(id, full_name, specialty, experience_years, rating)| Candidate {
            id,
            full_name: full_name.to_string(),
            specialty: specialty.to_string(),
            experience_years,
            rating,
            available: true,
            avatar_url: None,
        })
        .collect()
}
