//! # Placement Allocator (`allocator`)
//!
//! ## Purpose
//!
//! `allocator` sits on top of the profile, embedding, and index crates and
//! turns a candidate pool plus a slot pool into a committed assignment. It
//! owns the two pieces the rest of the workspace feeds into:
//!
//! - [`greedy_assign`] — the capacity-constrained greedy engine. Sorts the
//!   full score set best-first and walks it once, committing each pair whose
//!   candidate is still free and whose slot still has a seat.
//! - [`AllocationSession`] — the per-run orchestrator. Renders texts, embeds
//!   and normalizes both pools, builds the similarity index, computes the
//!   full pairwise score matrix, runs the greedy engine, and packages an
//!   [`AllocationOutcome`].
//!
//! The greedy walk is a maximum-score-first *heuristic*, not an optimal
//! bipartite matcher: a candidate can lose its best slot to a marginally
//! higher-scoring rival even when a different pairing would raise the total
//! score. That trade is deliberate and documented; there is no backtracking.
//!
//! A session is a plain value with no state carried between runs. Callers
//! that share capacity data across runs must serialize those runs
//! themselves — the engine assumes exclusive access to its input snapshot.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use allocator::AllocationSession;
//! use embedding::HashProvider;
//! use profile::{CandidateRecord, SlotRecord};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut candidate = CandidateRecord::new("c-1", "Asha Rao");
//! candidate.skills = Some("Rust, embedded systems".into());
//!
//! let mut slot = SlotRecord::new("s-1", "Acme Corp");
//! slot.required_skills = Some("systems programming".into());
//! slot.openings = 2;
//!
//! let session = AllocationSession::new(Arc::new(HashProvider::new(64)));
//! let outcome = session.run(&[candidate], &[slot]).await.unwrap();
//! assert_eq!(outcome.assignments.len() + outcome.unmatched.len(), 1);
//! # });
//! ```
//!
//! ## Observability
//!
//! Install an [`AllocationMetrics`] implementation via
//! [`set_allocation_metrics`] to record per-run latency and result counts.
//! Typically done once at service startup.

pub mod engine;
pub mod greedy;
pub mod metrics;
pub mod types;

pub use crate::engine::AllocationSession;
pub use crate::greedy::{greedy_assign, GreedyAssignment};
pub use crate::metrics::{set_allocation_metrics, AllocationMetrics};
pub use crate::types::{
    AllocationError, AllocationOutcome, Assignment, PreviewMatch, ScoreEntry, UnmatchedCandidate,
};
