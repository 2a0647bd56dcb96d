use pdfrag_core::error::{codes, AppError};
use serde::{Deserialize, Serialize};

use super::Embedder;
use crate::openai::OpenAiConfig;

/// Embedder backed by the `/embeddings` route of an OpenAI-protocol server.
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    config: OpenAiConfig,
}

impl OpenAiEmbedder {
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug, Clone, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingsItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsItem {
    embedding: Vec<f32>,
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let url = format!("{}/embeddings", self.config.base_url);
        let req = EmbeddingsRequest { model, input };
        let resp = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .timeout(std::time::Duration::from_secs(30))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new(codes::EMBEDDINGS_FAILED, "Failed to encode embeddings request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: EmbeddingsResponse = r.into_json().map_err(|e| {
                    AppError::new(codes::EMBEDDINGS_FAILED, "Failed to decode embeddings response")
                        .with_details(e.to_string())
                })?;
                let first = v.data.into_iter().next().ok_or_else(|| {
                    AppError::new(codes::EMBEDDINGS_FAILED, "Embeddings response contained no data")
                })?;
                if first.embedding.is_empty() {
                    return Err(AppError::new(
                        codes::EMBEDDINGS_FAILED,
                        "Embeddings response was empty",
                    ));
                }
                Ok(first.embedding)
            }
            Ok(r) => Err(
                AppError::new(codes::EMBEDDINGS_FAILED, "Embeddings request failed")
                    .with_details(format!("status={}", r.status())),
            ),
            Err(e) => Err(
                AppError::new(codes::EMBEDDINGS_FAILED, "Failed to call embeddings endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
