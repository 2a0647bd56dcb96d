use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use pdfrag_ai::engine::AnswerRecord;
use pdfrag_core::error::{codes, AppError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmMeta {
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunMeta {
    pub llm: LlmMeta,
    pub n_questions: u32,
}

/// Line-delimited writer for `answers.jsonl`.
///
/// The file handle stays open for the whole run; every record is flushed as
/// it is written so partial progress survives a crash mid-batch.
pub struct AnswerWriter {
    path: PathBuf,
    file: File,
}

impl AnswerWriter {
    /// Creates (or truncates) `answers.jsonl` inside `out_dir`.
    pub fn create(out_dir: &Path) -> Result<Self, AppError> {
        let path = out_dir.join("answers.jsonl");
        let file = File::create(&path).map_err(|e| {
            AppError::new(codes::OUTPUT_FAILED, "Failed to create answers file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    pub fn append(&mut self, record: &AnswerRecord) -> Result<(), AppError> {
        let json = serde_json::to_string(record).map_err(|e| {
            AppError::new(codes::OUTPUT_FAILED, "Failed to encode answer record")
                .with_details(e.to_string())
        })?;
        writeln!(self.file, "{json}").map_err(|e| {
            AppError::new(codes::OUTPUT_FAILED, "Failed to write answer record")
                .with_details(format!("path={}; err={}", self.path.display(), e))
        })?;
        self.file.flush().map_err(|e| {
            AppError::new(codes::OUTPUT_FAILED, "Failed to flush answers file")
                .with_details(format!("path={}; err={}", self.path.display(), e))
        })
    }
}

/// Writes `run_meta.json`, fully overwriting any previous content.
pub fn write_run_meta(out_dir: &Path, meta: &RunMeta) -> Result<PathBuf, AppError> {
    let path = out_dir.join("run_meta.json");
    let json = serde_json::to_string_pretty(meta).map_err(|e| {
        AppError::new(codes::OUTPUT_FAILED, "Failed to encode run metadata").with_details(e.to_string())
    })?;
    fs::write(&path, json.as_bytes()).map_err(|e| {
        AppError::new(codes::OUTPUT_FAILED, "Failed to write run metadata")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    Ok(path)
}
