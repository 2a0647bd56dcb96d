/// Character-based chunking parameters.
#[derive(Debug, Clone)]
pub struct ChunkParams {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            chunk_size: 1024,
            chunk_overlap: 100,
        }
    }
}

/// Split text into overlapping windows of roughly `chunk_size` characters.
///
/// A window that would cut a word in half snaps back to the last whitespace
/// inside its tail. Degenerate parameters (overlap >= size) still make
/// forward progress; the stride is clamped to at least one character.
pub fn split_text(text: &str, params: &ChunkParams) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let size = params.chunk_size.max(1);
    let stride = size.saturating_sub(params.chunk_overlap).max(1);
    let chars: Vec<char> = trimmed.chars().collect();

    let mut out: Vec<String> = Vec::new();
    let mut start = 0usize;
    while start < chars.len() {
        let mut end = (start + size).min(chars.len());
        if end < chars.len() {
            if let Some(ws) = chars[start..end].iter().rposition(|c| c.is_whitespace()) {
                // Only snap when it keeps the window a useful size.
                if ws > size / 2 {
                    end = start + ws;
                }
            }
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim().to_string();
        if !chunk.is_empty() {
            out.push(chunk);
        }

        if end >= chars.len() {
            break;
        }
        let next = end.saturating_sub(params.chunk_overlap);
        start = if next > start { next } else { start + stride };
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{split_text, ChunkParams};

    fn params(size: usize, overlap: usize) -> ChunkParams {
        ChunkParams {
            chunk_size: size,
            chunk_overlap: overlap,
        }
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert!(split_text("", &params(10, 2)).is_empty());
        assert!(split_text("   \n\n  ", &params(10, 2)).is_empty());
    }

    #[test]
    fn short_text_yields_one_chunk() {
        let out = split_text("hello world", &params(100, 10));
        assert_eq!(out, vec!["hello world".to_string()]);
    }

    #[test]
    fn consecutive_windows_share_the_overlap() {
        // No whitespace, so no snapping: pure sliding window.
        let text: String = ('a'..='z').cycle().take(30).collect();
        let out = split_text(&text, &params(10, 3));
        assert!(out.len() > 1);
        for pair in out.windows(2) {
            let n = pair[0].chars().count();
            let prev_tail: String = pair[0].chars().skip(n - 3).collect();
            assert!(pair[1].starts_with(&prev_tail));
        }
    }

    #[test]
    fn degenerate_overlap_still_terminates() {
        let text = "x".repeat(50);
        let out = split_text(&text, &params(8, 8));
        assert!(!out.is_empty());
        let out2 = split_text(&text, &params(8, 20));
        assert!(!out2.is_empty());
    }

    #[test]
    fn windows_prefer_whitespace_boundaries() {
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let out = split_text(text, &params(20, 4));
        for chunk in out.iter() {
            assert!(!chunk.starts_with(' '));
            assert!(!chunk.ends_with(' '));
        }
    }
}
