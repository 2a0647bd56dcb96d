use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{codes, AppError};

/// A PDF with its extracted, newline-normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Find every file with a `.pdf` extension under `input_dir`, recursively.
///
/// Returned paths are sorted so downstream chunk ids are deterministic.
pub fn discover_pdfs(input_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    if !input_dir.is_dir() {
        return Err(AppError::new(
            codes::INGEST_DIR_INVALID,
            "Input directory does not exist or is not a directory",
        )
        .with_details(format!("path={}", input_dir.display())));
    }

    let mut out: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input_dir).follow_links(true) {
        let entry = entry.map_err(|e| {
            AppError::new(codes::INGEST_DIR_INVALID, "Failed to walk input directory")
                .with_details(format!("path={}; err={}", input_dir.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_pdf = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            out.push(entry.into_path());
        }
    }
    out.sort();
    Ok(out)
}

/// Extract the text content of a single PDF.
///
/// Extraction failure is fatal; there is no best-effort path here.
pub fn load_pdf(path: &Path) -> Result<PdfDocument, AppError> {
    let raw = pdf_extract::extract_text(path).map_err(|e| {
        AppError::new(codes::INGEST_PDF_FAILED, "Failed to extract text from PDF")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    Ok(PdfDocument {
        path: path.to_path_buf(),
        text: normalize_text(&raw),
    })
}

/// Normalize line endings so chunk hashes are stable across platforms.
pub fn normalize_text(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
