//! Embedding provider boundary for the placement engine.
//!
//! The engine treats the embedding model as an opaque external function:
//! give it a batch of texts, get back one vector per text, in order. This
//! crate defines that boundary ([`EmbeddingProvider`]) and ships two
//! implementations:
//!
//! - [`HttpProvider`] — calls a remote inference endpoint over JSON/HTTP
//!   (Hugging Face, OpenAI, or a custom service).
//! - [`HashProvider`] — deterministic local vectors derived from a hash of
//!   the text. No model, no network. Used by tests and offline runs.
//!
//! Two contract points worth knowing:
//!
//! - Providers return *raw* vectors. L2 normalization is the consumer's job
//!   and happens immediately after receipt via [`l2_normalize_in_place`],
//!   so cosine similarity reduces to a plain dot product downstream.
//! - Repeated calls with identical text are assumed to return numerically
//!   close vectors. That determinism is an external precondition of the
//!   model service, not something this crate enforces.
//!
//! There is no retry, timeout-retry, or fallback logic here: a provider
//! failure aborts the caller's run. Resilience, if wanted, belongs to the
//! service behind the endpoint.

pub mod config;
pub mod error;
pub mod normalize;

mod hash;
mod http;

pub use crate::config::EmbedConfig;
pub use crate::error::EmbeddingError;
pub use crate::hash::HashProvider;
pub use crate::http::HttpProvider;
pub use crate::normalize::{l2_normalize_in_place, normalize_all, NORM_EPSILON};

use std::sync::Arc;

use async_trait::async_trait;

/// Boundary to the external embedding model.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts. The result has the same length and order as
    /// the input; an empty input yields an empty output without any remote
    /// call. Vectors are returned raw (not normalized).
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Construct a provider from configuration.
pub fn provider_from_config(
    cfg: &EmbedConfig,
) -> Result<Arc<dyn EmbeddingProvider>, EmbeddingError> {
    match cfg.mode.as_str() {
        "hash" => Ok(Arc::new(HashProvider::new(cfg.dimension))),
        "api" => Ok(Arc::new(HttpProvider::new(cfg)?)),
        other => Err(EmbeddingError::InvalidConfig(format!(
            "unknown embedding mode `{other}` (expected \"hash\" or \"api\")"
        ))),
    }
}
