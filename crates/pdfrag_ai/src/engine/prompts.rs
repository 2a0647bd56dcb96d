pub fn answer_prompt(question: &str, context_blocks: &str) -> String {
    // Keep the contract explicit:
    // - Answer ONLY from the retrieved excerpts.
    // - Say so plainly when the excerpts do not contain the answer.
    format!(
        r#"You are answering a question using excerpts retrieved from a set of PDF documents.

Rules (non-negotiable):
1) Use ONLY the excerpts provided below. Do not invent facts.
2) If the excerpts do not contain the answer, say so plainly.
3) Keep the answer concise and direct.

Question:
{question}

Excerpts:
{context_blocks}

Answer:"#
    )
}
