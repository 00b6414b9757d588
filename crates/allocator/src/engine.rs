use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use embedding::{l2_normalize_in_place, EmbeddingError, EmbeddingProvider};
use profile::{candidate_text, slot_text, CandidateRecord, SlotRecord};
use simindex::{AnnConfig, SimilarityIndex};

use crate::greedy::greedy_assign;
use crate::metrics::metrics_recorder;
use crate::types::{
    AllocationError, AllocationOutcome, Assignment, PreviewMatch, ScoreEntry, UnmatchedCandidate,
};


/// Per-run orchestrator for the allocation pipeline.
///
/// A session holds a provider handle and ANN tuning — nothing else. All
/// index and score state lives in local values inside one call to
/// [`run`](Self::run) or [`preview`](Self::preview), so consecutive runs
/// cannot observe each other.
pub struct AllocationSession {
    provider: Arc<dyn EmbeddingProvider>,
    ann: AnnConfig,
}

impl AllocationSession {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            ann: AnnConfig::default(),
        }
    }

    /// Session with explicit ANN gating for the slot index.
    pub fn with_ann_config(provider: Arc<dyn EmbeddingProvider>, ann: AnnConfig) -> Self {
        Self { provider, ann }
    }

    /// Run the committed allocation: build texts for both pools, embed and
    /// normalize, score every candidate against every slot, and walk the
    /// greedy engine.
    ///
    /// Empty pools are caller errors and raise before any embedding work.
    /// Individual records whose text representation is empty are silently
    /// excluded: such slots never enter the index, and such candidates land
    /// in the unmatched list. A pool whose *usable* texts all turn out
    /// empty degrades to an empty score set rather than raising.
    pub async fn run(
        &self,
        candidates: &[CandidateRecord],
        slots: &[SlotRecord],
    ) -> Result<AllocationOutcome, AllocationError> {
        if candidates.is_empty() {
            return Err(AllocationError::NoCandidates);
        }
        if slots.is_empty() {
            return Err(AllocationError::NoSlots);
        }

        let started = Instant::now();
        let index = self.build_slot_index(slots).await?;
        let (scored_candidates, candidate_vectors) = self.embed_candidates(candidates).await?;

        let mut entries = Vec::new();
        if !index.is_empty() && !scored_candidates.is_empty() {
            let scores = index.score_matrix(&candidate_vectors)?;
            entries.reserve(scored_candidates.len() * index.len());
            for (i, candidate) in scored_candidates.iter().enumerate() {
                for (j, slot_id) in index.ids().iter().enumerate() {
                    entries.push(ScoreEntry {
                        candidate_id: candidate.candidate_id.clone(),
                        slot_id: slot_id.clone(),
                        score: scores[[i, j]],
                    });
                }
            }
        }

        let capacities: HashMap<String, usize> = slots
            .iter()
            .map(|slot| (slot.slot_id.clone(), slot.capacity()))
            .collect();
        let candidate_ids: Vec<String> = candidates
            .iter()
            .map(|candidate| candidate.candidate_id.clone())
            .collect();

        let result = greedy_assign(&candidate_ids, entries, &capacities);

        let candidate_names: HashMap<&str, &str> = candidates
            .iter()
            .map(|c| (c.candidate_id.as_str(), c.display_name.as_str()))
            .collect();
        let slot_names: HashMap<&str, &str> = slots
            .iter()
            .map(|s| (s.slot_id.as_str(), s.display_name.as_str()))
            .collect();

        let assignments: Vec<Assignment> = result
            .matched
            .into_iter()
            .map(|entry| Assignment {
                candidate_name: name_for(&candidate_names, &entry.candidate_id),
                slot_name: name_for(&slot_names, &entry.slot_id),
                candidate_id: entry.candidate_id,
                slot_id: entry.slot_id,
                score: entry.score,
            })
            .collect();
        let unmatched: Vec<UnmatchedCandidate> = result
            .unmatched
            .into_iter()
            .map(|candidate_id| UnmatchedCandidate {
                candidate_name: name_for(&candidate_names, &candidate_id),
                candidate_id,
            })
            .collect();

        let outcome = AllocationOutcome {
            assignments,
            unmatched,
            total_candidates: candidates.len(),
            total_slots: slots.len(),
            elapsed: started.elapsed(),
        };

        tracing::info!(
            candidates = outcome.total_candidates,
            slots = outcome.total_slots,
            assigned = outcome.assignments.len(),
            unmatched = outcome.unmatched.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "allocation run complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_run(
                outcome.elapsed,
                outcome.assignments.len(),
                outcome.unmatched.len(),
            );
        }

        Ok(outcome)
    }

    /// Exploratory matching: up to `top_k` best slots per candidate, no
    /// capacity bookkeeping, nothing committed.
    ///
    /// Unlike [`run`](Self::run), empty pools yield an empty list here —
    /// this path answers "what would match?" and an empty answer is a valid
    /// one.
    pub async fn preview(
        &self,
        candidates: &[CandidateRecord],
        slots: &[SlotRecord],
        top_k: usize,
    ) -> Result<Vec<PreviewMatch>, AllocationError> {
        if candidates.is_empty() || slots.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let index = self.build_slot_index(slots).await?;
        if index.is_empty() {
            return Ok(Vec::new());
        }
        let (scored_candidates, candidate_vectors) = self.embed_candidates(candidates).await?;

        let slot_names: HashMap<&str, &str> = slots
            .iter()
            .map(|s| (s.slot_id.as_str(), s.display_name.as_str()))
            .collect();

        let mut hits = Vec::new();
        for (candidate, vector) in scored_candidates.iter().zip(&candidate_vectors) {
            for neighbor in index.top_k(vector, top_k)? {
                hits.push(PreviewMatch {
                    candidate_id: candidate.candidate_id.clone(),
                    candidate_name: candidate.display_name.clone(),
                    slot_name: name_for(&slot_names, &neighbor.id),
                    slot_id: neighbor.id,
                    score: neighbor.score,
                });
            }
        }

        let elapsed = started.elapsed();
        tracing::debug!(
            candidates = candidates.len(),
            hits = hits.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "preview matching complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_preview(elapsed, hits.len());
        }

        Ok(hits)
    }

    /// Embed the slot pool and build the similarity index over the usable
    /// entries. Slots with an empty text representation are skipped.
    async fn build_slot_index(
        &self,
        slots: &[SlotRecord],
    ) -> Result<SimilarityIndex, AllocationError> {
        let mut ids = Vec::new();
        let mut texts = Vec::new();
        for slot in slots {
            let text = slot_text(slot);
            if text.is_empty() {
                tracing::debug!(slot_id = %slot.slot_id, "slot skipped: empty text representation");
                continue;
            }
            ids.push(slot.slot_id.clone());
            texts.push(text);
        }

        let mut vectors = self.provider.embed_many(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::LengthMismatch {
                expected: texts.len(),
                got: vectors.len(),
            }
            .into());
        }
        for vector in vectors.iter_mut() {
            l2_normalize_in_place(vector);
        }

        let index =
            SimilarityIndex::build_with_ann(ids.into_iter().zip(vectors).collect(), self.ann)?;
        Ok(index)
    }

    /// Embed the usable candidates. Returns the surviving records (in input
    /// order) alongside their normalized vectors.
    async fn embed_candidates<'a>(
        &self,
        candidates: &'a [CandidateRecord],
    ) -> Result<(Vec<&'a CandidateRecord>, Vec<Vec<f32>>), AllocationError> {
        let mut usable = Vec::new();
        let mut texts = Vec::new();
        for candidate in candidates {
            let text = candidate_text(candidate);
            if text.is_empty() {
                tracing::debug!(
                    candidate_id = %candidate.candidate_id,
                    "candidate skipped: empty text representation"
                );
                continue;
            }
            usable.push(candidate);
            texts.push(text);
        }

        let mut vectors = self.provider.embed_many(&texts).await?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::LengthMismatch {
                expected: texts.len(),
                got: vectors.len(),
            }
            .into());
        }
        for vector in vectors.iter_mut() {
            l2_normalize_in_place(vector);
        }

        Ok((usable, vectors))
    }
}

fn name_for(names: &HashMap<&str, &str>, id: &str) -> String {
    names.get(id).copied().unwrap_or_default().to_string()
}
