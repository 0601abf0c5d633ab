//! Mock implementations for testing.
//!
//! This module provides mock LLM clients and retrievers that can be used
//! across different test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use workorder::llm::LLMClient;
use workorder::rag::DocumentRetriever;
use workorder::types::{AppError, Excerpt, Question, Result};

/// Shared, ordered record of which mock was called
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Mock LLM client for testing with configurable responses.
///
/// # Examples
///
/// ```ignore
/// // Create a client that returns a simple response
/// let client = MockLLMClient::new("Hello, world!");
///
/// // Create a client that always fails
/// let client = MockLLMClient::failing();
///
/// // Create a client that takes a while to answer
/// let client = MockLLMClient::new("late").with_delay(Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct MockLLMClient {
    response: String,
    should_fail: bool,
    delay: Option<Duration>,
    prompts: Arc<Mutex<Vec<(String, String)>>>,
    events: Option<(String, EventLog)>,
}

impl MockLLMClient {
    /// Create a new mock client that returns the given response.
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            should_fail: false,
            delay: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
            events: None,
        }
    }

    /// Create a mock client that always returns an error.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::new("")
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Push `label` onto `log` whenever this client is called.
    pub fn with_event_log(mut self, label: &str, log: EventLog) -> Self {
        self.events = Some((label.to_string(), log));
        self
    }

    /// Number of generation calls made so far.
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// `(system, prompt)` pairs seen so far.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }

    async fn respond(&self, system: &str, prompt: &str) -> Result<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system.to_string(), prompt.to_string()));
        if let Some((label, log)) = &self.events {
            log.lock().unwrap().push(label.clone());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err(AppError::GenerationUnavailable(
                "Mock LLM failure".to_string(),
            ));
        }
        Ok(self.response.clone())
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.respond("", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.respond(system, prompt).await
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Mock retriever returning a fixed set of excerpts.
#[derive(Clone)]
pub struct MockRetriever {
    excerpts: Vec<Excerpt>,
    should_fail: bool,
    calls: Arc<AtomicUsize>,
}

impl MockRetriever {
    pub fn new(excerpts: Vec<Excerpt>) -> Self {
        Self {
            excerpts,
            should_fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A retriever that finds nothing for any question.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::empty()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentRetriever for MockRetriever {
    async fn retrieve(&self, _question: &Question) -> Result<Vec<Excerpt>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(AppError::Retrieval("Mock retrieval failure".to_string()));
        }
        Ok(self.excerpts.clone())
    }

    fn source(&self) -> &str {
        "mock-report.pdf"
    }
}

/// Excerpts from the roof section of a typical inspection report.
pub fn roof_excerpts() -> Vec<Excerpt> {
    vec![
        Excerpt::new(
            "Roof: Asphalt shingles are cracked and curling on the south slope. \
             Several shingles are missing near the chimney.",
            1200,
            3.4,
        ),
        Excerpt::new(
            "Roof flashing around the chimney is loose and should be resealed.",
            1480,
            2.1,
        ),
    ]
}
