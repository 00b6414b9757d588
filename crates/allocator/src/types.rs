use std::time::Duration;

use embedding::EmbeddingError;
use serde::{Deserialize, Serialize};
use simindex::IndexError;
use thiserror::Error;

/// One scored candidate × slot pair.
///
/// Entries are generated candidate-major: every slot for the first
/// candidate, then every slot for the second, and so on. That generation
/// order is the final fallback when the greedy sort finds fully equal keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreEntry {
    pub candidate_id: String,
    pub slot_id: String,
    /// Cosine similarity in `[-1, 1]`; typically `[0, 1]` for real text.
    pub score: f32,
}

/// A committed candidate → slot assignment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub candidate_id: String,
    pub candidate_name: String,
    pub slot_id: String,
    pub slot_name: String,
    pub score: f32,
}

/// A candidate that ended the run without a slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnmatchedCandidate {
    pub candidate_id: String,
    pub candidate_name: String,
}

/// Exploratory hit from the top-k preview path. No capacity bookkeeping, no
/// commitment — the same slot may appear for many candidates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewMatch {
    pub candidate_id: String,
    pub candidate_name: String,
    pub slot_id: String,
    pub slot_name: String,
    pub score: f32,
}

/// Terminal output of one allocation run.
///
/// Invariants: every candidate id appears exactly once across
/// `assignments` ∪ `unmatched`; no slot id appears in `assignments` more
/// often than its capacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationOutcome {
    /// Committed assignments in commit order (highest score first).
    pub assignments: Vec<Assignment>,
    /// Candidates without a slot, in input order.
    pub unmatched: Vec<UnmatchedCandidate>,
    pub total_candidates: usize,
    pub total_slots: usize,
    /// Wall-clock time for the whole run, embedding included.
    #[serde(with = "duration_millis")]
    pub elapsed: Duration,
}

/// Errors produced by the allocation layer.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The run was asked to allocate from an empty candidate pool. Raised
    /// before any embedding work begins.
    #[error("no candidates supplied")]
    NoCandidates,
    /// The run was asked to allocate into an empty slot pool. Raised before
    /// any embedding work begins.
    #[error("no slots supplied")]
    NoSlots,
    /// The embedding provider failed; propagated unchanged, no retry, no
    /// partial result.
    #[error("embedding provider error: {0}")]
    Embedding(#[from] EmbeddingError),
    /// Index construction or scoring failed.
    #[error("index error: {0}")]
    Index(#[from] IndexError),
}

/// Serialize `Duration` as integer milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
