use std::fs;
use std::path::PathBuf;

use pdfrag_ai::embeddings::Embedder;
use pdfrag_ai::engine::QueryEngine;
use pdfrag_ai::index::{ChunkParams, IndexManifest, IndexStore};
use pdfrag_ai::llm::Llm;
use pdfrag_core::error::{codes, AppError};
use pdfrag_core::ingest;
use tracing::info;

use crate::output::{write_run_meta, AnswerWriter, LlmMeta, RunMeta};
use crate::questions;

#[derive(Debug, Clone)]
pub struct BuildArgs {
    pub input_dir: PathBuf,
    pub persist_dir: PathBuf,
    pub embed_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    /// Nothing to index; the persist directory was not touched.
    NoPdfs,
    Built(IndexManifest),
}

/// The builder's full flow: discover, extract, chunk, embed, persist.
///
/// The empty-input check runs before the persist directory is created, so
/// a no-PDF run leaves no trace on disk.
pub fn run_build(args: &BuildArgs, embedder: &dyn Embedder) -> Result<BuildOutcome, AppError> {
    let pdfs = ingest::discover_pdfs(&args.input_dir)?;
    if pdfs.is_empty() {
        return Ok(BuildOutcome::NoPdfs);
    }

    let mut docs = Vec::with_capacity(pdfs.len());
    for path in pdfs.iter() {
        info!(path = %path.display(), "extracting text");
        docs.push(ingest::load_pdf(path)?);
    }

    let params = ChunkParams {
        chunk_size: args.chunk_size,
        chunk_overlap: args.chunk_overlap,
    };
    let store = IndexStore::open(args.persist_dir.clone());
    let manifest = store.build(&docs, &params, embedder, &args.embed_model, &now_rfc3339()?)?;
    Ok(BuildOutcome::Built(manifest))
}

#[derive(Debug, Clone)]
pub struct QueryArgs {
    pub persist_dir: PathBuf,
    pub question: Option<String>,
    pub questions_file: Option<PathBuf>,
    pub out: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The output directory exists but no answers or metadata were written.
    NoQuestions,
    Answered {
        answers_path: PathBuf,
        n_questions: u32,
    },
}

/// The query runner's full flow: collect questions, load the index, answer
/// each question in order, then write the run metadata.
///
/// The output directory is created up front; when no question resolves the
/// run stops there, before the index is loaded or any output file exists.
pub fn run_query(
    args: &QueryArgs,
    embedder: &dyn Embedder,
    llm: &dyn Llm,
    llm_meta: &LlmMeta,
) -> Result<QueryOutcome, AppError> {
    fs::create_dir_all(&args.out).map_err(|e| {
        AppError::new(codes::OUTPUT_FAILED, "Failed to create output directory")
            .with_details(format!("path={}; err={}", args.out.display(), e))
    })?;

    let qs = questions::collect(args.question.as_deref(), args.questions_file.as_deref())?;
    if qs.is_empty() {
        return Ok(QueryOutcome::NoQuestions);
    }

    let index = IndexStore::open(args.persist_dir.clone()).load()?;
    info!(
        chunks = index.manifest.chunk_count,
        embed_model = %index.manifest.embed_model,
        "index loaded"
    );

    let engine = QueryEngine::new(index, embedder, llm, llm_meta.model.clone());

    let mut writer = AnswerWriter::create(&args.out)?;
    for q in qs.iter() {
        info!(question = %q, "answering");
        let record = engine.answer(q)?;
        writer.append(&record)?;
    }

    let n_questions = qs.len() as u32;
    write_run_meta(
        &args.out,
        &RunMeta {
            llm: llm_meta.clone(),
            n_questions,
        },
    )?;

    Ok(QueryOutcome::Answered {
        answers_path: writer.path().to_path_buf(),
        n_questions,
    })
}

fn now_rfc3339() -> Result<String, AppError> {
    let now = time::OffsetDateTime::now_utc();
    now.format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| {
            AppError::new(codes::INDEX_BUILD_FAILED, "Failed to format build timestamp")
                .with_details(e.to_string())
        })
}
