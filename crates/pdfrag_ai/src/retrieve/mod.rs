use pdfrag_core::error::{codes, AppError};

use crate::index::LoadedIndex;

mod similarity;

/// One retrieval result: a chunk id and its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub chunk_id: String,
    pub score: f32,
}

/// Rank every indexed vector against the query and keep the best `top_k`.
///
/// Dimensionality is checked explicitly against the manifest so a query
/// embedded with the wrong model fails loudly instead of scoring garbage.
pub fn top_k_hits(
    index: &LoadedIndex,
    query_vec: &[f32],
    top_k: usize,
) -> Result<Vec<Hit>, AppError> {
    let dims = index.manifest.dims;
    if query_vec.len() as u32 != dims {
        return Err(AppError::new(
            codes::RETRIEVAL_FAILED,
            "Query embedding dims do not match index dims",
        )
        .with_details(format!(
            "index_dims={dims}; query_dims={}",
            query_vec.len()
        )));
    }

    let qnorm = similarity::l2_norm(query_vec);
    if qnorm == 0.0 {
        return Err(AppError::new(
            codes::RETRIEVAL_FAILED,
            "Query embedding norm is zero",
        ));
    }

    let mut hits: Vec<Hit> = Vec::new();
    for (chunk_id, v) in index.vectors.iter() {
        if v.len() as u32 != dims {
            return Err(AppError::new(codes::RETRIEVAL_FAILED, "Index vector dims mismatch")
                .with_details(format!(
                    "chunk_id={chunk_id}; expected={dims}; got={}",
                    v.len()
                )));
        }
        let vnorm = similarity::l2_norm(v);
        if vnorm == 0.0 {
            continue;
        }
        hits.push(Hit {
            chunk_id: chunk_id.clone(),
            score: similarity::cosine_similarity(query_vec, v, qnorm, vnorm),
        });
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    hits.truncate(top_k.max(1));
    Ok(hits)
}
