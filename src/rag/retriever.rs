//! Document retrieval for the research stage
//!
//! [`PdfSearchTool`] extracts the report's text once, splits it into
//! overlapping chunks and indexes them with BM25. Retrieval afterwards is a
//! read-only lookup, so one tool can be shared by concurrent runs.

use super::chunker::{TextChunk, TextChunker};
use super::loader::load_document_text;
use super::search::Bm25Index;
use crate::types::{AppError, Excerpt, Question, Result};
use crate::utils::toml_config::RetrievalConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Finds passages of a document relevant to a question.
#[async_trait]
pub trait DocumentRetriever: Send + Sync {
    /// Return excerpts ordered most relevant first. An empty list means the
    /// document has nothing on the question; it is not an error.
    async fn retrieve(&self, question: &Question) -> Result<Vec<Excerpt>>;

    /// Human-readable name of the searched document
    fn source(&self) -> &str;
}

/// Lexical search over a single document
#[derive(Debug)]
pub struct PdfSearchTool {
    source: String,
    chunks: Vec<TextChunk>,
    index: Bm25Index,
    top_k: usize,
    min_score: f32,
}

impl PdfSearchTool {
    /// Index already-extracted text
    pub fn from_text(source: impl Into<String>, text: &str, config: &RetrievalConfig) -> Result<Self> {
        let source = source.into();
        if text.trim().is_empty() {
            return Err(AppError::Retrieval(format!(
                "No text could be extracted from {}",
                source
            )));
        }

        let chunker = TextChunker::new(config.chunk_size, config.chunk_overlap)?;
        let chunks = chunker.chunk(text);

        let mut index = Bm25Index::new();
        for (i, chunk) in chunks.iter().enumerate() {
            index.add_document(&i.to_string(), &chunk.content);
        }

        tracing::info!(
            source = %source,
            chunks = chunks.len(),
            "Indexed document"
        );

        Ok(Self {
            source,
            chunks,
            index,
            top_k: config.top_k,
            min_score: config.min_score,
        })
    }

    /// Extract and index a document from disk
    pub fn from_path(path: &Path, config: &RetrievalConfig) -> Result<Self> {
        let text = load_document_text(path)?;
        Self::from_text(path.display().to_string(), &text, config)
    }

    /// Same as [`PdfSearchTool::from_path`], off the async executor
    pub async fn open(path: impl Into<PathBuf>, config: RetrievalConfig) -> Result<Self> {
        let path = path.into();
        tokio::task::spawn_blocking(move || Self::from_path(&path, &config))
            .await
            .map_err(|e| AppError::Internal(format!("Document indexing task failed: {}", e)))?
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Synchronous search used by [`DocumentRetriever::retrieve`]
    pub fn search(&self, query: &str) -> Vec<Excerpt> {
        // Rank every candidate here so equal scores fall back to document order
        let mut excerpts: Vec<Excerpt> = self
            .index
            .search(query, self.index.len())
            .into_iter()
            .filter(|(_, score)| *score >= self.min_score)
            .filter_map(|(id, score)| {
                let chunk = self.chunks.get(id.parse::<usize>().ok()?)?;
                Some(Excerpt::new(chunk.content.clone(), chunk.offset, score))
            })
            .collect();

        excerpts.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.offset.cmp(&b.offset))
        });
        excerpts.truncate(self.top_k);
        excerpts
    }
}

#[async_trait]
impl DocumentRetriever for PdfSearchTool {
    async fn retrieve(&self, question: &Question) -> Result<Vec<Excerpt>> {
        let excerpts = self.search(question.as_str());
        tracing::debug!(
            source = %self.source,
            question = %question,
            excerpts = excerpts.len(),
            "Retrieved excerpts"
        );
        Ok(excerpts)
    }

    fn source(&self) -> &str {
        &self.source
    }
}
