//! Approximate nearest-neighbor acceleration for top-k retrieval.
//!
//! Backed by an HNSW graph. Sub-linear search at the cost of a slower build
//! and a small recall loss, so it only pays off for large slot pools —
//! [`AnnConfig::min_vectors_for_ann`] gates it at runtime, and tiny pools
//! (fewer than 10 vectors) always use the exact scan regardless.

use std::cmp::Ordering;

use hnsw_rs::prelude::*;

use crate::IndexError;

/// Construction and search knobs for the HNSW graph.
#[derive(Debug, Clone, Copy)]
pub struct AnnConfig {
    /// Number of neighbors per node (higher = better recall, slower build).
    pub m: usize,
    /// Candidate list size during construction.
    pub ef_construction: usize,
    /// Candidate list size during search.
    pub ef_search: usize,
    /// Whether ANN may be used at all.
    pub enabled: bool,
    /// Minimum pool size before ANN replaces the exact scan.
    pub min_vectors_for_ann: usize,
}

impl Default for AnnConfig {
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
            ef_search: 50,
            enabled: true,
            min_vectors_for_ann: 1000,
        }
    }
}

impl AnnConfig {
    pub fn with_m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    pub fn with_ef_construction(mut self, ef: usize) -> Self {
        self.ef_construction = ef;
        self
    }

    pub fn with_ef_search(mut self, ef: usize) -> Self {
        self.ef_search = ef;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_min_vectors_for_ann(mut self, min: usize) -> Self {
        self.min_vectors_for_ann = min;
        self
    }

    /// Whether ANN should be used for a pool of the given size.
    pub fn should_use_ann(&self, num_vectors: usize) -> bool {
        self.enabled && num_vectors >= self.min_vectors_for_ann
    }
}

/// One search hit: row index into the inserted vectors plus cosine distance
/// (`1 - similarity`, lower is closer).
#[derive(Debug, Clone, PartialEq)]
pub struct AnnResult {
    pub index: usize,
    pub distance: f32,
}

/// HNSW index over fixed-dimension vectors.
pub struct AnnIndex {
    config: AnnConfig,
    dimension: usize,
    hnsw: Option<Hnsw<'static, f32, DistCosine>>,
    vectors: Vec<Vec<f32>>,
    built: bool,
}

impl AnnIndex {
    pub fn new(dimension: usize, config: AnnConfig) -> Self {
        Self {
            config,
            dimension,
            hnsw: None,
            vectors: Vec::new(),
            built: false,
        }
    }

    /// Insert a vector. Its row index is the insertion order.
    pub fn insert(&mut self, vector: Vec<f32>) -> Result<(), IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        self.vectors.push(vector);
        self.built = false;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Build the HNSW graph. Pools smaller than 10 vectors skip the graph
    /// entirely and keep answering via the exact scan.
    pub fn build(&mut self) {
        if self.vectors.is_empty() {
            return;
        }

        let nb_elem = self.vectors.len();
        if nb_elem < 10 {
            self.built = true;
            return;
        }

        let nb_layer = 16.min((nb_elem as f32).ln().trunc() as usize);
        let hnsw = Hnsw::<f32, DistCosine>::new(
            self.config.m,
            nb_elem,
            nb_layer,
            self.config.ef_construction,
            DistCosine {},
        );

        let data_for_insertion: Vec<(&Vec<f32>, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, vec)| (vec, idx))
            .collect();
        hnsw.parallel_insert(&data_for_insertion);

        self.hnsw = Some(hnsw);
        self.built = true;
    }

    /// Nearest neighbors for one query, closest first.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<AnnResult>, IndexError> {
        if query.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }

        if let Some(hnsw) = &self.hnsw {
            let ef = self.config.ef_search.max(k);
            let neighbours: Vec<Neighbour> = hnsw.search(query, k, ef);
            return Ok(neighbours
                .into_iter()
                .map(|n| AnnResult {
                    index: n.get_origin_id(),
                    distance: n.distance,
                })
                .collect());
        }

        self.linear_search(query, k)
    }

    /// Exact scan fallback for unbuilt or tiny pools.
    fn linear_search(&self, query: &[f32], k: usize) -> Result<Vec<AnnResult>, IndexError> {
        if self.vectors.is_empty() {
            return Ok(Vec::new());
        }

        let mut distances: Vec<AnnResult> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, vec)| AnnResult {
                index,
                distance: cosine_distance(query, vec),
            })
            .collect();

        distances.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });
        distances.truncate(k);
        Ok(distances)
    }
}

/// Cosine distance (`1 - cosine similarity`). Lower means more similar.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
