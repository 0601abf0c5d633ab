//! Retrieval over the inspection report
//!
//! # Module Structure
//!
//! - [`rag::loader`](crate::rag::loader) - Text extraction (PDF, plain text)
//! - [`rag::chunker`](crate::rag::chunker) - Overlapping text chunks
//! - [`rag::search`](crate::rag::search) - BM25 lexical index
//! - [`rag::retriever`](crate::rag::retriever) - The [`DocumentRetriever`] seam and [`PdfSearchTool`]
//!
//! # Pipeline
//!
//! 1. **Extraction** - The document's text is extracted once at startup
//! 2. **Chunking** - Text is split into overlapping chunks
//! 3. **Indexing** - Chunks are indexed with BM25
//! 4. **Retrieval** - Each question returns the top-scoring chunks as excerpts
//!
//! # Example
//!
//! ```ignore
//! use workorder::rag::{DocumentRetriever, PdfSearchTool};
//! use workorder::utils::toml_config::RetrievalConfig;
//!
//! let tool = PdfSearchTool::open("example_home_inspection.pdf", RetrievalConfig::default()).await?;
//! let excerpts = tool.retrieve(&Question::new("roof")?).await?;
//! ```

pub mod chunker;
pub mod loader;
pub mod retriever;
pub mod search;

pub use retriever::{DocumentRetriever, PdfSearchTool};
