use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of error codes this workspace emits. Call sites name the
/// code through these constants so the wire values stay in one place.
pub mod codes {
    pub const INGEST_DIR_INVALID: &str = "INGEST_DIR_INVALID";
    pub const INGEST_PDF_FAILED: &str = "INGEST_PDF_FAILED";
    pub const EMBEDDINGS_FAILED: &str = "EMBEDDINGS_FAILED";
    pub const LLM_FAILED: &str = "LLM_FAILED";
    pub const INDEX_BUILD_FAILED: &str = "INDEX_BUILD_FAILED";
    pub const INDEX_NOT_READY: &str = "INDEX_NOT_READY";
    pub const RETRIEVAL_FAILED: &str = "RETRIEVAL_FAILED";
    pub const QUESTIONS_INVALID: &str = "QUESTIONS_INVALID";
    pub const OUTPUT_FAILED: &str = "OUTPUT_FAILED";
}

/// Single structured error shape used across the workspace crates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
