pub mod analyzer;
pub mod chunker;

pub use analyzer::Analyzer;
pub use chunker::{chunk_text, Chunk, WordChunker, DEFAULT_SPLIT_SIZE};
