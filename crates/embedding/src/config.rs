use serde::{Deserialize, Serialize};

/// Runtime configuration for the embedding boundary.
///
/// # Example
/// ```
/// use embedding::EmbedConfig;
///
/// let cfg = EmbedConfig {
///     mode: "api".into(),
///     api_url: Some("https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     api_provider: Some("hf".into()),
///     ..Default::default()
/// };
/// assert_eq!(cfg.model_name, "all-MiniLM-L6-v2");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedConfig {
    /// Provider selector: `"hash"` (deterministic local) or `"api"` (remote HTTP).
    pub mode: String,
    /// Friendly model label; also sent to providers whose payload carries a
    /// model field (e.g. OpenAI-shaped endpoints).
    pub model_name: String,
    /// Vector dimension produced by the hash provider. Remote providers
    /// determine their own dimension.
    pub dimension: usize,
    /// Inference endpoint when [`mode`](Self::mode) is `"api"`.
    #[serde(default)]
    pub api_url: Option<String>,
    /// Authorization header value (e.g. `"Bearer hf_xxx"`).
    #[serde(default)]
    pub api_auth_header: Option<String>,
    /// Payload shape hint: `"hf"`, `"openai"`, or anything else for the
    /// custom `{"texts": [...]}` shape.
    #[serde(default)]
    pub api_provider: Option<String>,
    /// Overall request timeout in seconds.
    #[serde(default)]
    pub api_timeout_secs: Option<u64>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            mode: "hash".into(),
            model_name: "all-MiniLM-L6-v2".into(),
            dimension: 384,
            api_url: None,
            api_auth_header: None,
            api_provider: None,
            api_timeout_secs: Some(30),
        }
    }
}
