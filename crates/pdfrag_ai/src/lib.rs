pub mod embeddings;
pub mod engine;
pub mod index;
pub mod llm;
pub mod openai;
pub mod retrieve;
