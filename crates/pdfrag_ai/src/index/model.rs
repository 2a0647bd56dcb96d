use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One retrievable chunk of a source document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexChunk {
    pub chunk_id: String,
    pub doc_path: String,
    pub ordinal: u32,
    pub text: String,
    pub text_sha256: String,
}

impl IndexChunk {
    /// Chunk ids hash the document path, ordinal and text so rebuilds of
    /// identical input produce identical ids.
    pub fn new(doc_path: &str, ordinal: u32, text: String) -> Self {
        let text_sha256 = sha256_hex(text.as_bytes());
        let chunk_id = sha256_hex(format!("{doc_path}\u{0}{ordinal}\u{0}{text}").as_bytes());
        Self {
            chunk_id,
            doc_path: doc_path.to_string(),
            ordinal,
            text,
            text_sha256,
        }
    }
}

/// Build configuration pinned alongside the persisted vectors.
///
/// The query phase re-creates the embedder from `embed_model` and checks
/// query vectors against `dims` instead of trusting the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexManifest {
    pub embed_model: String,
    pub dims: u32,
    pub chunk_count: u32,
    pub chunk_size: u32,
    pub chunk_overlap: u32,
    pub created_at: String, // RFC3339
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    hex::encode(digest)
}
