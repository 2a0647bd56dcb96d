use std::collections::BTreeMap;
use std::path::PathBuf;

use pdfrag_ai::embeddings::Embedder;
use pdfrag_ai::engine::QueryEngine;
use pdfrag_ai::index::{ChunkParams, IndexChunk, IndexManifest, IndexStore, LoadedIndex};
use pdfrag_ai::llm::Llm;
use pdfrag_core::error::AppError;
use pdfrag_core::ingest::PdfDocument;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct CountABEmbedder;

impl Embedder for CountABEmbedder {
    fn embed(&self, _model: &str, input: &str) -> Result<Vec<f32>, AppError> {
        let mut a = 0u32;
        let mut b = 0u32;
        for ch in input.chars() {
            if ch == 'a' {
                a += 1;
            } else if ch == 'b' {
                b += 1;
            }
        }
        Ok(vec![a as f32, b as f32])
    }
}

/// Echoes the prompt back so tests can inspect what the LLM was given.
struct EchoLlm;

impl Llm for EchoLlm {
    fn generate(&self, _model: &str, prompt: &str) -> Result<String, AppError> {
        Ok(prompt.to_string())
    }
}

struct FixedLlm;

impl Llm for FixedLlm {
    fn generate(&self, _model: &str, _prompt: &str) -> Result<String, AppError> {
        Ok("The SLA is 99.9%.".to_string())
    }
}

fn build_loaded_index(dir: &TempDir) -> LoadedIndex {
    let store = IndexStore::open(dir.path().join("persist"));
    let docs = vec![
        PdfDocument {
            path: PathBuf::from("docs/contract.pdf"),
            text: "a".repeat(300),
        },
        PdfDocument {
            path: PathBuf::from("docs/vendor.pdf"),
            text: "b".repeat(300),
        },
    ];
    store
        .build(
            &docs,
            &ChunkParams {
                chunk_size: 400,
                chunk_overlap: 50,
            },
            &CountABEmbedder,
            "mock-model",
            "2026-08-23T00:00:00Z",
        )
        .expect("build");
    store.load().expect("load")
}

#[test]
fn answer_record_carries_question_answer_and_scored_sources() {
    let dir = TempDir::new().expect("tempdir");
    let index = build_loaded_index(&dir);

    let engine = QueryEngine::new(index, &CountABEmbedder, &FixedLlm, "mock-llm");
    let record = engine.answer("What is the SLA? aaaa").expect("answer");

    assert_eq!(record.question, "What is the SLA? aaaa");
    assert_eq!(record.answer, "The SLA is 99.9%.");
    assert_eq!(record.sources.len(), 2);

    let top = &record.sources[0];
    assert_eq!(top.doc_id.as_deref(), Some("docs/contract.pdf"));
    assert!(top.score.is_some());
    assert!(top.meta.contains_key("chunk_id"));
    assert!(top.meta.contains_key("ordinal"));
    assert!(top.meta.contains_key("text_sha256"));
}

#[test]
fn prompt_contains_the_retrieved_chunk_text() {
    let dir = TempDir::new().expect("tempdir");
    let index = build_loaded_index(&dir);

    let engine = QueryEngine::new(index, &CountABEmbedder, &EchoLlm, "mock-llm");
    let record = engine.answer("aaaa").expect("answer");

    assert!(record.answer.contains("aaaa"), "prompt repeats the question");
    assert!(record.answer.contains(&"a".repeat(300)));
    assert!(record.answer.contains("docs/contract.pdf"));
}

#[test]
fn missing_chunk_record_degrades_citations_but_keeps_the_answer() {
    let dir = TempDir::new().expect("tempdir");
    let mut index = build_loaded_index(&dir);

    // Drop one chunk record while leaving its vector in place.
    let victim = index
        .chunks
        .values()
        .find(|c| c.doc_path == "docs/vendor.pdf")
        .map(|c| c.chunk_id.clone())
        .expect("chunk");
    index.chunks.remove(&victim);

    let engine = QueryEngine::new(index, &CountABEmbedder, &FixedLlm, "mock-llm");
    let record = engine.answer("ab").expect("answer");

    assert_eq!(record.answer, "The SLA is 99.9%.");
    assert_eq!(record.sources.len(), 1);
    assert_eq!(record.sources[0].doc_id.as_deref(), Some("docs/contract.pdf"));
}

#[test]
fn sources_serialize_as_an_array_even_when_empty() {
    let manifest = IndexManifest {
        embed_model: "mock-model".to_string(),
        dims: 2,
        chunk_count: 1,
        chunk_size: 400,
        chunk_overlap: 50,
        created_at: "2026-08-23T00:00:00Z".to_string(),
    };
    // One orphaned vector: retrieval hits it, citation extraction skips it.
    let orphan = IndexChunk::new("docs/ghost.pdf", 0, "a".repeat(10));
    let mut vectors = BTreeMap::new();
    vectors.insert(orphan.chunk_id.clone(), vec![10.0, 0.0]);
    let index = LoadedIndex {
        manifest,
        chunks: BTreeMap::new(),
        vectors,
    };

    let engine = QueryEngine::new(index, &CountABEmbedder, &FixedLlm, "mock-llm");
    let record = engine.answer("aaaa").expect("answer");
    assert!(record.sources.is_empty());

    let json = serde_json::to_value(&record).expect("encode");
    assert!(json.get("sources").expect("sources key").is_array());
}

#[test]
fn empty_question_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let index = build_loaded_index(&dir);

    let engine = QueryEngine::new(index, &CountABEmbedder, &FixedLlm, "mock-llm");
    let err = engine.answer("   ").expect_err("should fail");
    assert_eq!(err.code, "RETRIEVAL_FAILED");
}
