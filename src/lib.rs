//! # workorder
//!
//! A two-stage crew that answers a customer's question about a home inspection
//! report and drafts a professional email to a contractor about the issues
//! found.
//!
//! ## Overview
//!
//! 1. **Research** - Relevant excerpts are retrieved from the report and a
//!    language model answers the question from them.
//! 2. **Writing** - A second agent turns the answer into an email requesting a
//!    quote or action plan, signed with a fixed signature.
//!
//! The stages always run in that order; a failure in either stage ends the
//! run without an email.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use workorder::agents::{AnswerGenerator, EmailDrafter};
//! use workorder::rag::PdfSearchTool;
//! use workorder::utils::toml_config::WorkorderConfig;
//! use workorder::{Crew, LLMClientFactory};
//!
//! #[tokio::main]
//! async fn main() -> workorder::Result<()> {
//!     let config = WorkorderConfig::load_or_default("workorder.toml")?;
//!     let factory = LLMClientFactory::new(config.resolve_provider()?, config.generation_params());
//!     let llm = factory.create_default()?;
//!     let tool = Arc::new(PdfSearchTool::open(&config.document.path, config.retrieval.clone()).await?);
//!
//!     let crew = Crew::new(AnswerGenerator::new(llm.clone(), tool), EmailDrafter::new(llm))
//!         .with_stage_timeout(config.stage_timeout());
//!     let output = crew.kickoff("Roof").await?;
//!     println!("{}", output.email);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - The research and writing stages
//! - [`cli`] - Command-line parsing and terminal output
//! - [`llm`] - LLM client implementations
//! - [`rag`] - Document extraction, chunking and BM25 retrieval
//! - [`workflows`] - The sequential crew engine
//! - [`types`] - Domain values and error handling
//! - [`utils`] - Configuration and logging

#![warn(rustdoc::missing_crate_level_docs)]

/// Research and writing stages.
pub mod agents;
/// Command-line interface.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Retrieval over the inspection report.
pub mod rag;
/// Core types (domain values, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;
/// Crew engine running the stages in sequence.
pub mod workflows;

// Re-export commonly used types
pub use llm::{LLMClient, LLMClientFactory, Provider};
pub use types::{AppError, Result};
pub use utils::toml_config::WorkorderConfig;
pub use workflows::{Crew, CrewOutput, TaskOutput};
