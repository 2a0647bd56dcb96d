use std::fs;
use std::path::Path;

use pdfrag_core::error::{codes, AppError};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct QuestionLine {
    question: Option<String>,
}

/// Collect questions in submission order: the single CLI question (when
/// present) first, then the file questions in file order.
///
/// Blank lines are skipped. A non-blank line that is not valid JSON is
/// fatal; a valid line without a non-empty `question` field is skipped.
pub fn collect(
    cli_question: Option<&str>,
    questions_file: Option<&Path>,
) -> Result<Vec<String>, AppError> {
    let mut out: Vec<String> = Vec::new();

    if let Some(q) = cli_question {
        let q = q.trim();
        if !q.is_empty() {
            out.push(q.to_string());
        }
    }

    if let Some(path) = questions_file {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::new(codes::QUESTIONS_INVALID, "Failed to read questions file")
                .with_details(format!("path={}; err={}", path.display(), e))
        })?;
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let parsed: QuestionLine = serde_json::from_str(line).map_err(|e| {
                AppError::new(codes::QUESTIONS_INVALID, "Questions file line is not valid JSON")
                    .with_details(format!(
                        "path={}; line={}; err={}",
                        path.display(),
                        lineno + 1,
                        e
                    ))
            })?;
            if let Some(q) = parsed.question {
                let q = q.trim();
                if !q.is_empty() {
                    out.push(q.to_string());
                }
            }
        }
    }

    Ok(out)
}
