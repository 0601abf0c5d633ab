use crate::types::{AppError, Result};
use text_splitter::{ChunkConfig, TextSplitter};

/// A contiguous piece of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Byte offset of the chunk within the source text
    pub offset: usize,
    pub content: String,
}

/// Splits text into overlapping chunks of at most `chunk_size` characters,
/// preferring semantic boundaries (paragraphs, sentences, words).
pub struct TextChunker {
    splitter: TextSplitter<text_splitter::Characters>,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Configuration(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| AppError::Configuration(format!("Invalid chunk settings: {}", e)))?;

        Ok(Self {
            splitter: TextSplitter::new(config),
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        self.splitter
            .chunk_indices(text)
            .map(|(offset, content)| TextChunk {
                offset,
                content: content.to_string(),
            })
            .collect()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }
}
