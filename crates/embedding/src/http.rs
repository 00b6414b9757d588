use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{EmbedConfig, EmbeddingError, EmbeddingProvider};

/// Request payload shape expected by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadShape {
    HuggingFace,
    OpenAi,
    Custom,
}

/// Remote embedding provider speaking JSON over HTTP.
///
/// One POST per batch. Failures map to [`EmbeddingError::Http`] /
/// [`EmbeddingError::Response`] and are handed straight back to the caller;
/// there is no retry here.
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
    model_name: String,
    shape: PayloadShape,
}

impl HttpProvider {
    pub fn new(cfg: &EmbedConfig) -> Result<Self, EmbeddingError> {
        let url = cfg.api_url.clone().ok_or_else(|| {
            EmbeddingError::InvalidConfig("api_url is required for api mode".into())
        })?;
        let timeout = Duration::from_secs(cfg.api_timeout_secs.unwrap_or(30));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| EmbeddingError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            auth_header: cfg.api_auth_header.clone(),
            model_name: cfg.model_name.clone(),
            shape: payload_shape(cfg),
        })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpProvider {
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let payload = build_payload(self.shape, texts, &self.model_name);
        let mut request = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json");
        if let Some(header) = self.auth_header.as_deref() {
            request = request.header("Authorization", header);
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmbeddingError::Http(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Http(format!("HTTP error {status}: {body}")));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| EmbeddingError::Response(format!("invalid JSON response: {e}")))?;

        parse_embeddings(value)
    }
}

fn payload_shape(cfg: &EmbedConfig) -> PayloadShape {
    let provider = cfg
        .api_provider
        .as_deref()
        .unwrap_or("custom")
        .to_ascii_lowercase();
    match provider.as_str() {
        "hf" | "huggingface" => PayloadShape::HuggingFace,
        "openai" | "gpt" => PayloadShape::OpenAi,
        _ => PayloadShape::Custom,
    }
}

fn build_payload(shape: PayloadShape, texts: &[String], model_name: &str) -> Value {
    match shape {
        PayloadShape::HuggingFace => json!({ "inputs": texts }),
        PayloadShape::OpenAi => json!({ "input": texts, "model": model_name }),
        PayloadShape::Custom => json!({ "texts": texts }),
    }
}

/// Accepts the three response shapes seen in the wild: a bare array of
/// vectors, `{"embeddings": [...]}`, and OpenAI-style
/// `{"data": [{"embedding": [...]}, ...]}`.
fn parse_embeddings(value: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_vector_collection(embeddings);
            }
            if let Some(Value::Array(items)) = map.remove("data") {
                let mut vectors = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(mut obj) => match obj.remove("embedding") {
                            Some(embedding) => vectors.push(parse_vector(embedding)?),
                            None => {
                                return Err(EmbeddingError::Response(
                                    "missing `embedding` field in data item".into(),
                                ))
                            }
                        },
                        _ => {
                            return Err(EmbeddingError::Response(
                                "unexpected entry inside `data` array".into(),
                            ))
                        }
                    }
                }
                return Ok(vectors);
            }
            Err(EmbeddingError::Response(
                "unsupported API response shape".into(),
            ))
        }
        other => parse_vector_collection(other),
    }
}

fn parse_vector_collection(value: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Vec::new())
            } else if items.iter().all(|item| matches!(item, Value::Array(_))) {
                items.into_iter().map(parse_vector).collect()
            } else {
                // A single flat vector for a single input.
                parse_vector(Value::Array(items)).map(|v| vec![v])
            }
        }
        other => Err(EmbeddingError::Response(format!(
            "embedding collection must be an array, got {other:?}"
        ))),
    }
}

fn parse_vector(value: Value) -> Result<Vec<f32>, EmbeddingError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num.as_f64().map(|f| f as f32).ok_or_else(|| {
                    EmbeddingError::Response("non-finite embedding value".into())
                }),
                other => Err(EmbeddingError::Response(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(EmbeddingError::Response(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
