use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use pdfrag_core::error::{codes, AppError};
use pdfrag_core::ingest::PdfDocument;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::chunking::{split_text, ChunkParams};
use super::model::{IndexChunk, IndexManifest};
use crate::embeddings::Embedder;

/// File-backed index storage rooted at the persist directory.
///
/// Layout: `index_manifest.json`, `index_chunks.json`, `index_vectors.json`.
/// All writes go through a tmp-file-then-rename step.
#[derive(Debug, Clone)]
pub struct IndexStore {
    root: PathBuf,
}

/// A fully reloaded index, ready for similarity queries.
#[derive(Debug, Clone)]
pub struct LoadedIndex {
    pub manifest: IndexManifest,
    pub chunks: BTreeMap<String, IndexChunk>,
    pub vectors: BTreeMap<String, Vec<f32>>,
}

impl IndexStore {
    pub fn open(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    fn manifest_path(&self) -> PathBuf {
        self.root.join("index_manifest.json")
    }

    fn chunks_path(&self) -> PathBuf {
        self.root.join("index_chunks.json")
    }

    fn vectors_path(&self) -> PathBuf {
        self.root.join("index_vectors.json")
    }

    fn ensure_dirs(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.root).map_err(|e| {
            AppError::new(codes::INDEX_BUILD_FAILED, "Failed to create persist directory")
                .with_details(format!("path={}; err={}", self.root.display(), e))
        })
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T, what: &str) -> Result<(), AppError> {
        let tmp = path.with_extension("tmp");
        let json = serde_json::to_string_pretty(value).map_err(|e| {
            AppError::new(codes::INDEX_BUILD_FAILED, format!("Failed to encode {what}"))
                .with_details(e.to_string())
        })?;
        fs::write(&tmp, json.as_bytes()).map_err(|e| {
            AppError::new(codes::INDEX_BUILD_FAILED, format!("Failed to write {what}"))
                .with_details(format!("path={}; err={}", tmp.display(), e))
        })?;
        fs::rename(&tmp, path).map_err(|e| {
            AppError::new(codes::INDEX_BUILD_FAILED, format!("Failed to finalize {what} write"))
                .with_details(format!(
                    "tmp={}; dest={}; err={}",
                    tmp.display(),
                    path.display(),
                    e
                ))
        })
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path, what: &str) -> Result<T, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::new(codes::INDEX_NOT_READY, format!("Failed to read {what}"))
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::new(codes::INDEX_NOT_READY, format!("Failed to decode {what}"))
                .with_details(format!("path={}; err={}", path.display(), e))
        })
    }

    /// Chunk and embed the documents, then persist the complete index.
    ///
    /// Nothing is written until every chunk has been embedded; a failed
    /// embedding call leaves the persist directory untouched.
    pub fn build(
        &self,
        docs: &[PdfDocument],
        params: &ChunkParams,
        embedder: &dyn Embedder,
        embed_model: &str,
        created_at: &str,
    ) -> Result<IndexManifest, AppError> {
        let mut chunks: BTreeMap<String, IndexChunk> = BTreeMap::new();
        for doc in docs {
            let doc_path = doc.path.display().to_string();
            for (ordinal, text) in split_text(&doc.text, params).into_iter().enumerate() {
                let chunk = IndexChunk::new(&doc_path, ordinal as u32, text);
                chunks.insert(chunk.chunk_id.clone(), chunk);
            }
        }
        if chunks.is_empty() {
            return Err(AppError::new(
                codes::INDEX_BUILD_FAILED,
                "Documents produced no chunks to index",
            ));
        }
        debug!(chunks = chunks.len(), docs = docs.len(), "chunking complete");

        let mut vectors: BTreeMap<String, Vec<f32>> = BTreeMap::new();
        let mut dims: Option<u32> = None;
        for (chunk_id, chunk) in chunks.iter() {
            let v = embedder.embed(embed_model, &chunk.text).map_err(|e| {
                AppError::new(codes::EMBEDDINGS_FAILED, "Failed to compute embeddings")
                    .with_details(format!("chunk_id={chunk_id}; err={e}"))
                    .with_retryable(e.retryable)
            })?;
            let this_dims = v.len() as u32;
            match dims {
                Some(d) if d != this_dims => {
                    return Err(AppError::new(
                        codes::INDEX_BUILD_FAILED,
                        "Embedding dimension mismatch across chunks",
                    )
                    .with_details(format!(
                        "expected={d}; got={this_dims}; chunk_id={chunk_id}"
                    )));
                }
                Some(_) => {}
                None => dims = Some(this_dims),
            }
            vectors.insert(chunk_id.clone(), v);
        }
        let dims = dims.ok_or_else(|| {
            AppError::new(codes::INDEX_BUILD_FAILED, "No embeddings were produced")
        })?;

        self.ensure_dirs()?;
        self.write_json(&self.chunks_path(), &chunks, "index chunks")?;
        self.write_json(&self.vectors_path(), &vectors, "index vectors")?;
        let manifest = IndexManifest {
            embed_model: embed_model.to_string(),
            dims,
            chunk_count: vectors.len() as u32,
            chunk_size: params.chunk_size as u32,
            chunk_overlap: params.chunk_overlap as u32,
            created_at: created_at.to_string(),
        };
        self.write_json(&self.manifest_path(), &manifest, "index manifest")?;
        info!(
            chunks = manifest.chunk_count,
            dims = manifest.dims,
            path = %self.root.display(),
            "index persisted"
        );
        Ok(manifest)
    }

    /// Reload a persisted index into memory.
    pub fn load(&self) -> Result<LoadedIndex, AppError> {
        let manifest_path = self.manifest_path();
        if !manifest_path.exists() {
            return Err(AppError::new(
                codes::INDEX_NOT_READY,
                "No index manifest found; build the index first",
            )
            .with_details(format!("path={}", manifest_path.display())));
        }
        let manifest: IndexManifest = self.read_json(&manifest_path, "index manifest")?;
        let chunks: BTreeMap<String, IndexChunk> =
            self.read_json(&self.chunks_path(), "index chunks")?;
        let vectors: BTreeMap<String, Vec<f32>> =
            self.read_json(&self.vectors_path(), "index vectors")?;
        if vectors.is_empty() {
            return Err(AppError::new(
                codes::INDEX_NOT_READY,
                "Index vectors missing; rebuild the index",
            ));
        }
        Ok(LoadedIndex {
            manifest,
            chunks,
            vectors,
        })
    }
}
