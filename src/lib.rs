//! Workspace umbrella crate for the placement allocation engine.
//!
//! Stitches the stage crates together so callers can go from raw records to
//! a committed assignment with a single call:
//!
//! - `profile` — candidate/slot records and canonical text representation
//! - `embedding` — the provider boundary and L2 normalization
//! - `simindex` — exact pairwise scoring and top-k retrieval
//! - `allocator` — the greedy engine and the per-run session
//!
//! ```
//! use placement::{allocate, CandidateRecord, EmbedConfig, SlotRecord};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut candidate = CandidateRecord::new("c-1", "Asha Rao");
//! candidate.skills = Some("Rust, distributed systems".into());
//!
//! let mut slot = SlotRecord::new("s-1", "Acme Corp");
//! slot.required_skills = Some("systems programming".into());
//!
//! let outcome = allocate(&[candidate], &[slot], &EmbedConfig::default())
//!     .await
//!     .unwrap();
//! assert_eq!(outcome.total_candidates, 1);
//! # });
//! ```

pub use allocator::{
    greedy_assign, set_allocation_metrics, AllocationError, AllocationMetrics, AllocationOutcome,
    AllocationSession, Assignment, GreedyAssignment, PreviewMatch, ScoreEntry, UnmatchedCandidate,
};
pub use embedding::{
    l2_normalize_in_place, provider_from_config, EmbedConfig, EmbeddingError, EmbeddingProvider,
    HashProvider, HttpProvider,
};
pub use profile::{candidate_text, slot_text, CandidateRecord, SlotRecord, FIELD_SEPARATOR};
pub use simindex::{AnnConfig, IndexError, Neighbor, SimilarityIndex};

/// Run a committed allocation end-to-end: build a provider from `cfg`, open
/// a per-run session, and return its outcome.
pub async fn allocate(
    candidates: &[CandidateRecord],
    slots: &[SlotRecord],
    cfg: &EmbedConfig,
) -> Result<AllocationOutcome, AllocationError> {
    let provider = provider_from_config(cfg)?;
    AllocationSession::new(provider).run(candidates, slots).await
}

/// Exploratory top-k matching without committing anything.
pub async fn preview(
    candidates: &[CandidateRecord],
    slots: &[SlotRecord],
    cfg: &EmbedConfig,
    top_k: usize,
) -> Result<Vec<PreviewMatch>, AllocationError> {
    let provider = provider_from_config(cfg)?;
    AllocationSession::new(provider)
        .preview(candidates, slots, top_k)
        .await
}
