use super::{AgentProfile, Stage, WritingInput};
use crate::llm::LLMClient;
use crate::types::{Answer, Email, Result, SIGNATURE};
use async_trait::async_trait;
use std::sync::Arc;

/// Writing stage: drafts the contractor email from the research answer
pub struct EmailDrafter {
    llm: Arc<dyn LLMClient>,
    profile: AgentProfile,
}

impl EmailDrafter {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            profile: Self::default_profile(),
        }
    }

    pub fn with_profile(mut self, profile: AgentProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn default_profile() -> AgentProfile {
        AgentProfile::new(
            "Professional Writer",
            "Write professional emails based on the research agent's findings.",
            "You have excellent writing skills and craft clear and concise emails \
             based on the provided information.",
        )
    }

    pub fn build_prompt(answer: &Answer) -> String {
        let instructions = if answer.is_grounded() {
            "- Clearly state the issues found in the specified section of the report.\n\
             - Request a quote or an action plan for fixing these issues."
        } else {
            "- The report did not identify any issue for the requested section. Say so \
             plainly and do not invent problems.\n\
             - Ask the contractor to confirm whether an inspection of that area is needed."
        };

        format!(
            "Write a professional email to a contractor based on the research agent's \
             findings.\n{}\n- Sign the email exactly with: {}\n\n\
             Expected output: a clear and concise email that can be sent to a contractor \
             to address the issues found in the home inspection report.\n\n\
             Research findings:\n{}",
            instructions,
            SIGNATURE,
            answer.text()
        )
    }
}

#[async_trait]
impl Stage for EmailDrafter {
    type Input = WritingInput;
    type Output = Email;

    fn name(&self) -> &'static str {
        "writing"
    }

    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn run(&self, input: &WritingInput) -> Result<Email> {
        tracing::debug!(
            grounded = input.answer.is_grounded(),
            model = self.llm.model_name(),
            "Drafting email"
        );

        let prompt = Self::build_prompt(&input.answer);
        let draft = self
            .llm
            .generate_with_system(&self.profile.system_prompt(), &prompt)
            .await?;

        Email::signed(draft)
    }
}
