use super::{AgentProfile, ResearchInput, Stage};
use crate::llm::LLMClient;
use crate::rag::DocumentRetriever;
use crate::types::{Answer, Excerpt, Question, Result};
use async_trait::async_trait;
use std::sync::Arc;

const TASK_DESCRIPTION: &str = "Answer the customer's question based on the home inspection report. \
Use only the excerpts below, which were retrieved from the report. Your answer MUST be clear \
and accurate and must not contain information that is not in the excerpts.";

const EXPECTED_OUTPUT: &str = "A clear and accurate answer to the customer's question based on \
the content of the home inspection report.";

/// Research stage: retrieves excerpts and asks the model to answer from them
pub struct AnswerGenerator {
    llm: Arc<dyn LLMClient>,
    retriever: Arc<dyn DocumentRetriever>,
    profile: AgentProfile,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LLMClient>, retriever: Arc<dyn DocumentRetriever>) -> Self {
        Self {
            llm,
            retriever,
            profile: Self::default_profile(),
        }
    }

    pub fn with_profile(mut self, profile: AgentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn default_profile() -> AgentProfile {
        AgentProfile::new(
            "Research Agent",
            "Search through the inspection report to find the relevant answers.",
            "You are adept at searching and extracting data from documents, \
             ensuring accurate and prompt responses.",
        )
    }

    /// Task prompt with the question and numbered excerpts
    pub fn build_prompt(question: &Question, excerpts: &[Excerpt]) -> String {
        let mut prompt = format!(
            "{}\n\nExpected output: {}\n\nCustomer question: {}\n\nReport excerpts:\n",
            TASK_DESCRIPTION, EXPECTED_OUTPUT, question
        );
        for (i, excerpt) in excerpts.iter().enumerate() {
            prompt.push_str(&format!("\n[{}] {}\n", i + 1, excerpt.content.trim()));
        }
        prompt
    }
}

#[async_trait]
impl Stage for AnswerGenerator {
    type Input = ResearchInput;
    type Output = Answer;

    fn name(&self) -> &'static str {
        "research"
    }

    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn run(&self, input: &ResearchInput) -> Result<Answer> {
        let question = &input.question;
        let excerpts = self.retriever.retrieve(question).await?;

        if excerpts.is_empty() {
            tracing::info!(
                source = self.retriever.source(),
                "No relevant excerpts, skipping generation"
            );
            return Ok(Answer::not_found(question));
        }

        tracing::debug!(
            excerpts = excerpts.len(),
            model = self.llm.model_name(),
            "Generating answer"
        );

        let prompt = Self::build_prompt(question, &excerpts);
        let response = self
            .llm
            .generate_with_system(&self.profile.system_prompt(), &prompt)
            .await?;

        Answer::grounded(response, excerpts.len())
    }
}
