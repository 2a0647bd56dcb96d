pub mod chunking;
pub mod model;
pub mod store;

pub use chunking::{split_text, ChunkParams};
pub use model::{IndexChunk, IndexManifest};
pub use store::{IndexStore, LoadedIndex};
