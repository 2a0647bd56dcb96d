use std::env;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_API_KEY: &str = "dummy";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-protocol endpoint.
///
/// Passed explicitly into the embedder and LLM constructors; there is no
/// process-global default to mutate.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl OpenAiConfig {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve from `OPENAI_MODEL`, `OPENAI_API_KEY` and `OPENAI_BASE_URL`.
    ///
    /// The API key default keeps the client usable against self-hosted
    /// servers (vLLM and similar) that do not enforce authentication.
    pub fn from_env() -> Self {
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_else(|_| DEFAULT_API_KEY.to_string());
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(model, api_key, &base_url)
    }
}
