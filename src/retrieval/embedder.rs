// Embedding provider client — the swap-ready abstraction.
//
// The Embedder trait keeps the pipeline independent of any one provider.
// The default implementation posts to an OpenAI-compatible /v1/embeddings
// endpoint. Calls block until the provider answers; there is no retry or
// timeout policy, so provider failures surface directly to the caller.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

/// Trait for turning text into embedding vectors. Implementations must be
/// async because providers are reached over HTTP.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, returning vectors in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> Result<Vec<f64>> {
        let mut vectors = self.embed_batch(&[text.to_string()]).await?;
        vectors
            .pop()
            .context("Embedding provider returned no vector")
    }
}

/// Client for an OpenAI-compatible embeddings endpoint.
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    url: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String, url: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            url,
            model,
        }
    }

    /// Build an embedder from configuration. Fails when the API key is
    /// missing, so callers get the .env hint before any network call.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.require_api_key()?;
        Ok(Self::new(
            config.openai_api_key.clone(),
            config.embedding_url.clone(),
            config.embedding_model.clone(),
        ))
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to call embedding provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Embedding provider returned {}: {}", status, body);
        }

        let result: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse embedding provider response")?;

        if result.data.len() != texts.len() {
            anyhow::bail!(
                "Embedding provider returned {} vectors for {} inputs",
                result.data.len(),
                texts.len()
            );
        }

        // The API reports an index per vector; sort so output order
        // matches input order regardless of response order.
        let mut data = result.data;
        data.sort_by_key(|d| d.index);

        debug!(
            batch = texts.len(),
            model = %self.model,
            dim = data.first().map(|d| d.embedding.len()).unwrap_or(0),
            "Embedded batch"
        );

        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

// --- Embedding API request/response types ---

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing_sorts_by_index() {
        let raw = r#"{
            "object": "list",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.3, 0.4]},
                {"object": "embedding", "index": 0, "embedding": [0.1, 0.2]}
            ],
            "model": "text-embedding-3-small",
            "usage": {"prompt_tokens": 4, "total_tokens": 4}
        }"#;

        let parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        let mut data = parsed.data;
        data.sort_by_key(|d| d.index);
        assert_eq!(data[0].embedding, vec![0.1, 0.2]);
        assert_eq!(data[1].embedding, vec![0.3, 0.4]);
    }

    #[test]
    fn test_request_serialization() {
        let texts = vec!["hello".to_string()];
        let request = EmbeddingRequest {
            model: "text-embedding-3-small",
            input: &texts,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"][0], "hello");
    }
}
