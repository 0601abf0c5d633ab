//! The two stages of the work-order crew
//!
//! - [`research::AnswerGenerator`] answers the customer's question from the
//!   report's excerpts.
//! - [`writer::EmailDrafter`] turns that answer into a contractor email.
//!
//! Each stage is an agent: a persona ([`AgentProfile`]) plus a task run
//! against an [`LLMClient`](crate::llm::LLMClient).

pub mod research;
pub mod writer;

use crate::types::{Answer, Question, Result};
use async_trait::async_trait;

pub use research::AnswerGenerator;
pub use writer::EmailDrafter;

/// A single step of the crew with typed input and output
#[async_trait]
pub trait Stage: Send + Sync {
    type Input: Send + Sync;
    type Output: Send;

    /// Short identifier used in logs, task outputs and timeout errors
    fn name(&self) -> &'static str;

    /// Persona the stage runs as
    fn profile(&self) -> &AgentProfile;

    async fn run(&self, input: &Self::Input) -> Result<Self::Output>;
}

/// Role, goal and backstory of an agent, rendered into its system prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentProfile {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    pub fn system_prompt(&self) -> String {
        format!(
            "You are the {}. {}\n\nYour goal: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// Input of the research stage
#[derive(Debug, Clone)]
pub struct ResearchInput {
    pub question: Question,
}

/// Input of the writing stage. Only built from a research answer.
#[derive(Debug, Clone)]
pub struct WritingInput {
    pub answer: Answer,
}
