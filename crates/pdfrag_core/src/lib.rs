pub mod error;
pub mod ingest;

#[cfg(test)]
mod tests {
    use super::error::{codes, AppError};
    use super::ingest::normalize_text;

    #[test]
    fn app_error_is_structured() {
        let err = AppError::new(codes::INGEST_PDF_FAILED, "extraction failed").with_retryable(false);
        assert_eq!(err.code, "INGEST_PDF_FAILED");
        assert_eq!(err.message, "extraction failed");
        assert_eq!(err.retryable, false);
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc\n"), "a\nb\nc\n");
    }
}
