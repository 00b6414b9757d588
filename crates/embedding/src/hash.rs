use async_trait::async_trait;
use fxhash::hash64;

use crate::{EmbeddingError, EmbeddingProvider};

/// Deterministic offline provider.
///
/// Derives sinusoid values from a hash of the input text, so identical text
/// always yields an identical vector and different texts diverge. The
/// vectors carry no semantic signal; this exists for tests, demos, and
/// offline runs where the pipeline shape matters more than match quality.
#[derive(Debug, Clone)]
pub struct HashProvider {
    dimension: usize,
}

impl HashProvider {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let h = hash64(text.as_bytes());
        (0..self.dimension)
            .map(|idx| ((h >> (idx % 32)) as f32 * 0.0001).sin())
            .collect()
    }
}

#[async_trait]
impl EmbeddingProvider for HashProvider {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|text| self.embed_one(text)).collect())
    }
}
