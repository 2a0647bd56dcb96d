use pdfrag_core::error::{codes, AppError};
use serde::{Deserialize, Serialize};

use super::Llm;
use crate::openai::OpenAiConfig;

/// LLM backed by the `/chat/completions` route of an OpenAI-protocol server.
#[derive(Debug, Clone)]
pub struct OpenAiLlm {
    config: OpenAiConfig,
}

impl OpenAiLlm {
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl Llm for OpenAiLlm {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let req = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = ureq::post(&url)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .timeout(std::time::Duration::from_secs(120))
            .send_json(serde_json::to_value(req).map_err(|e| {
                AppError::new(codes::LLM_FAILED, "Failed to encode chat request")
                    .with_details(e.to_string())
            })?);

        match resp {
            Ok(r) if r.status() == 200 => {
                let v: ChatResponse = r.into_json().map_err(|e| {
                    AppError::new(codes::LLM_FAILED, "Failed to decode chat response")
                        .with_details(e.to_string())
                })?;
                let first = v.choices.into_iter().next().ok_or_else(|| {
                    AppError::new(codes::LLM_FAILED, "Chat response contained no choices")
                })?;
                if first.message.content.trim().is_empty() {
                    return Err(AppError::new(codes::LLM_FAILED, "Chat response was empty"));
                }
                Ok(first.message.content)
            }
            Ok(r) => Err(AppError::new(codes::LLM_FAILED, "Chat request failed")
                .with_details(format!("status={}", r.status()))),
            Err(e) => Err(
                AppError::new(codes::LLM_FAILED, "Failed to call chat endpoint")
                    .with_details(e.to_string())
                    .with_retryable(true),
            ),
        }
    }
}
