use std::collections::BTreeMap;

use pdfrag_core::error::{codes, AppError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embeddings::Embedder;
use crate::index::LoadedIndex;
use crate::llm::Llm;
use crate::retrieve::top_k_hits;

mod prompts;

/// Retrieval depth per question. The synthesized answer is grounded on at
/// most this many chunks.
pub const TOP_K: usize = 4;

/// One citation backing an answer. Fields the extraction could not fill are
/// `None`/empty rather than failing the answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRef {
    pub doc_id: Option<String>,
    pub score: Option<f32>,
    pub meta: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Answers questions against a loaded index: embed, retrieve, synthesize.
pub struct QueryEngine<'a> {
    index: LoadedIndex,
    embedder: &'a dyn Embedder,
    llm: &'a dyn Llm,
    llm_model: String,
    top_k: usize,
}

impl<'a> QueryEngine<'a> {
    pub fn new(
        index: LoadedIndex,
        embedder: &'a dyn Embedder,
        llm: &'a dyn Llm,
        llm_model: impl Into<String>,
    ) -> Self {
        Self {
            index,
            embedder,
            llm,
            llm_model: llm_model.into(),
            top_k: TOP_K,
        }
    }

    pub fn answer(&self, question: &str) -> Result<AnswerRecord, AppError> {
        let q = question.trim();
        if q.is_empty() {
            return Err(AppError::new(
                codes::RETRIEVAL_FAILED,
                "Question must not be empty",
            ));
        }

        let qv = self.embedder.embed(&self.index.manifest.embed_model, q)?;
        let hits = top_k_hits(&self.index, &qv, self.top_k)?;
        debug!(hits = hits.len(), "retrieved context chunks");

        let mut blocks: Vec<String> = Vec::new();
        let mut sources: Vec<SourceRef> = Vec::new();
        for hit in hits.iter() {
            // A hit without a chunk record leaves the citation list short;
            // the answer itself is still produced.
            let chunk = match self.index.chunks.get(&hit.chunk_id) {
                Some(c) => c,
                None => continue,
            };
            blocks.push(format!(
                "[{}#{}]\n{}",
                chunk.doc_path, chunk.ordinal, chunk.text
            ));

            let mut meta: BTreeMap<String, serde_json::Value> = BTreeMap::new();
            meta.insert(
                "chunk_id".to_string(),
                serde_json::Value::from(chunk.chunk_id.clone()),
            );
            meta.insert("ordinal".to_string(), serde_json::Value::from(chunk.ordinal));
            meta.insert(
                "text_sha256".to_string(),
                serde_json::Value::from(chunk.text_sha256.clone()),
            );
            sources.push(SourceRef {
                doc_id: Some(chunk.doc_path.clone()),
                score: Some(hit.score),
                meta,
            });
        }

        let prompt = prompts::answer_prompt(q, &blocks.join("\n\n---\n\n"));
        let answer = self.llm.generate(&self.llm_model, &prompt)?;

        Ok(AnswerRecord {
            question: q.to_string(),
            answer,
            sources,
        })
    }
}
