//! In-memory similarity index over unit-length slot embeddings.
//!
//! The index holds one row per slot whose text representation was non-empty
//! (exclusion happens upstream; the index never sees degenerate entries) and
//! a parallel list of slot identifiers. It is a per-run value: build it,
//! query it, drop it. Nothing is persisted and nothing is shared across runs.
//!
//! Two query modes:
//!
//! - [`SimilarityIndex::score_matrix`] — the exact candidate×slot cosine
//!   matrix, computed as one matrix multiply. Rows are unit vectors, so the
//!   dot product *is* the cosine similarity. This feeds the committed
//!   allocation run.
//! - [`SimilarityIndex::top_k`] — up to k best slots for a single query
//!   vector, for bounded exploratory matching. Exact linear scan for small
//!   pools, HNSW above [`AnnConfig::min_vectors_for_ann`]. Results are
//!   truncated, never padded: fewer than k valid neighbors means a shorter
//!   list, not sentinel entries.

mod ann;

pub use crate::ann::{AnnConfig, AnnIndex, AnnResult};

use std::cmp::Ordering;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by index construction and queries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("zero-length embedding vector for `{0}`")]
    EmptyVector(String),
}

/// A single retrieval hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Neighbor {
    /// Identifier of the matched slot.
    pub id: String,
    /// Cosine similarity to the query (dot product of unit vectors).
    pub score: f32,
}

/// Stack equal-length vectors into an `n × d` row-major matrix.
pub fn stack_embeddings(vectors: &[Vec<f32>]) -> Result<Array2<f32>, IndexError> {
    let dim = vectors.first().map(|v| v.len()).unwrap_or(0);
    let mut flat = Vec::with_capacity(vectors.len() * dim);
    for v in vectors {
        if v.len() != dim {
            return Err(IndexError::DimensionMismatch {
                expected: dim,
                got: v.len(),
            });
        }
        flat.extend_from_slice(v);
    }
    Ok(Array2::from_shape_vec((vectors.len(), dim), flat)
        .expect("row count and dimension were just validated"))
}

/// Normalized slot embeddings plus their parallel identifiers.
pub struct SimilarityIndex {
    ids: Vec<String>,
    matrix: Array2<f32>,
    ann: Option<AnnIndex>,
}

impl SimilarityIndex {
    /// Build an index from `(id, unit vector)` pairs with default ANN gating.
    ///
    /// An empty entry set builds an empty index — a valid state that scores
    /// nothing, not an error.
    pub fn build(entries: Vec<(String, Vec<f32>)>) -> Result<Self, IndexError> {
        Self::build_with_ann(entries, AnnConfig::default())
    }

    /// Build an index with explicit ANN configuration.
    pub fn build_with_ann(
        entries: Vec<(String, Vec<f32>)>,
        ann_cfg: AnnConfig,
    ) -> Result<Self, IndexError> {
        let mut ids = Vec::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len());
        for (id, vector) in entries {
            if vector.is_empty() {
                return Err(IndexError::EmptyVector(id));
            }
            ids.push(id);
            vectors.push(vector);
        }

        let matrix = stack_embeddings(&vectors)?;

        let ann = if ann_cfg.should_use_ann(ids.len()) {
            let mut ann = AnnIndex::new(matrix.ncols(), ann_cfg);
            for vector in &vectors {
                ann.insert(vector.clone())?;
            }
            ann.build();
            Some(ann)
        } else {
            None
        };

        log::debug!(
            "similarity index built: {} entries, dim {}, ann={}",
            ids.len(),
            matrix.ncols(),
            ann.is_some()
        );

        Ok(Self { ids, matrix, ann })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Embedding dimension; 0 for an empty index.
    pub fn dimension(&self) -> usize {
        self.matrix.ncols()
    }

    /// Slot identifiers in row order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Exact full pairwise scores: `queries × indexᵀ`.
    ///
    /// Row `i`, column `j` is the cosine similarity between query `i` and
    /// the slot at [`SimilarityIndex::ids`]`[j]`. An empty index yields an
    /// `n × 0` matrix.
    pub fn score_matrix(&self, queries: &[Vec<f32>]) -> Result<Array2<f32>, IndexError> {
        if self.is_empty() {
            return Ok(Array2::zeros((queries.len(), 0)));
        }
        if queries.is_empty() {
            return Ok(Array2::zeros((0, self.len())));
        }

        let q = stack_embeddings(queries)?;
        if q.ncols() != self.dimension() {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension(),
                got: q.ncols(),
            });
        }
        Ok(q.dot(&self.matrix.t()))
    }

    /// Up to `k` best slots for one query vector, best first.
    ///
    /// Ties are broken by id ascending so the order is deterministic. The
    /// result length is `min(k, len)` — no sentinel padding.
    pub fn top_k(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }
        if query.len() != self.dimension() {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension(),
                got: query.len(),
            });
        }

        if let Some(ann) = &self.ann {
            let hits = ann.search(query, k)?;
            return Ok(hits
                .into_iter()
                .map(|hit| Neighbor {
                    id: self.ids[hit.index].clone(),
                    score: 1.0 - hit.distance,
                })
                .collect());
        }

        let mut scored: Vec<Neighbor> = self
            .ids
            .iter()
            .zip(self.matrix.outer_iter())
            .map(|(id, row)| Neighbor {
                id: id.clone(),
                score: row.iter().zip(query).map(|(a, b)| a * b).sum(),
            })
            .collect();
        scored.sort_unstable_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        scored.truncate(k);
        Ok(scored)
    }
}
