use thiserror::Error;

/// Errors surfaced by embedding providers and their consumers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmbeddingError {
    /// The configuration cannot produce a working provider.
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),
    /// The HTTP request failed or the endpoint answered with a non-success status.
    #[error("embedding request failed: {0}")]
    Http(String),
    /// The endpoint answered, but the body could not be read as embeddings.
    #[error("malformed embedding response: {0}")]
    Response(String),
    /// The provider returned a different number of vectors than texts sent.
    #[error("provider returned {got} embeddings for {expected} inputs")]
    LengthMismatch { expected: usize, got: usize },
}
