//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for the language models that back
//! the crew's stages. Provider-specific HTTP details live behind the
//! [`LLMClient`] trait, so stages (and tests) only ever see the trait.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - Runtime provider selection
//! - [`LLMClientFactory`] - Creates clients from the configured provider
//!
//! # Example
//!
//! ```ignore
//! use workorder::llm::{GenerationParams, LLMClientFactory, Provider};
//!
//! let factory = LLMClientFactory::new(
//!     Provider::Ollama {
//!         base_url: "http://localhost:11434".to_string(),
//!         model: "llama3.2".to_string(),
//!     },
//!     GenerationParams::default(),
//! );
//! let client = factory.create_default()?;
//! let response = client.generate("What is 2+2?").await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// Ollama `/api/chat` client.
pub mod ollama;
/// OpenAI-compatible chat completions client.
pub mod openai;

pub use client::{ChatMessage, GenerationParams, LLMClient, LLMClientFactory, Provider};
