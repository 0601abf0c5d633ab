//! Crew Engine
//!
//! Runs the research stage and then the writing stage for one question,
//! enforcing per-stage timeouts and recording each task's output.

use crate::agents::{AnswerGenerator, EmailDrafter, ResearchInput, Stage, WritingInput};
use crate::types::{AppError, Answer, Email, Question, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Default upper bound on a single stage
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(120);

// ============= Run State Machine =============

/// Lifecycle of a single crew run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    /// Run created, question not yet validated
    AwaitingQuestion,
    /// Research stage in progress
    Researching,
    /// Writing stage in progress
    Drafting,
    /// Email produced (terminal)
    Done,
    /// Run failed (terminal)
    Failed,
}

/// Events that move a run between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    QuestionAccepted,
    AnswerReady,
    EmailReady,
    Failure,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Apply `event`, rejecting transitions that would skip or reorder stages.
    ///
    /// Valid transitions:
    /// - AwaitingQuestion → Researching (QuestionAccepted)
    /// - Researching → Drafting (AnswerReady)
    /// - Drafting → Done (EmailReady)
    /// - any non-terminal → Failed (Failure)
    pub fn transition(&self, event: RunEvent) -> Result<RunState> {
        use RunEvent::*;
        use RunState::*;

        let next = match (self, event) {
            (AwaitingQuestion, QuestionAccepted) => Researching,
            (Researching, AnswerReady) => Drafting,
            (Drafting, EmailReady) => Done,
            (state, Failure) if !state.is_terminal() => Failed,
            (state, event) => {
                return Err(AppError::Internal(format!(
                    "Invalid run transition from {:?} on {:?}",
                    state, event
                )))
            }
        };

        tracing::trace!(from = ?self, to = ?next, "Run state transition");
        Ok(next)
    }
}

// ============= Run Outputs =============

/// Record of one executed stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Stage identifier ("research" or "writing")
    pub stage: String,
    /// Role of the agent that ran the stage
    pub agent: String,
    /// The input provided to the stage
    pub input: String,
    /// The stage's output
    pub output: String,
    /// When the stage started
    pub timestamp: DateTime<Utc>,
    /// Duration of this stage in milliseconds
    pub duration_ms: u64,
}

/// Result of a successful crew run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    pub run_id: Uuid,
    pub question: Question,
    pub answer: Answer,
    /// The final email, ending with the signature
    pub email: Email,
    /// Per-stage records in execution order
    pub tasks_output: Vec<TaskOutput>,
}

// ============= Crew =============

/// Sequential two-stage crew
///
/// A crew only holds shared read-only resources, so one instance can serve
/// concurrent `kickoff` calls.
pub struct Crew {
    researcher: AnswerGenerator,
    writer: EmailDrafter,
    stage_timeout: Duration,
}

impl Crew {
    pub fn new(researcher: AnswerGenerator, writer: EmailDrafter) -> Self {
        Self {
            researcher,
            writer,
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }

    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    pub fn stage_timeout(&self) -> Duration {
        self.stage_timeout
    }

    /// Run both stages for a raw customer question.
    ///
    /// The writing stage only starts after the research stage produced an
    /// answer. Any failure aborts the run and no email is returned.
    pub async fn kickoff(&self, raw_question: &str) -> Result<CrewOutput> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("crew_run", %run_id);

        async {
            let mut state = RunState::AwaitingQuestion;
            match self.execute(run_id, raw_question, &mut state).await {
                Ok(output) => {
                    tracing::info!(
                        stages = output.tasks_output.len(),
                        grounded = output.answer.is_grounded(),
                        "Crew run completed"
                    );
                    Ok(output)
                }
                Err(e) => {
                    state = state.transition(RunEvent::Failure).unwrap_or(RunState::Failed);
                    tracing::error!(error = %e, state = ?state, "Crew run failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        run_id: Uuid,
        raw_question: &str,
        state: &mut RunState,
    ) -> Result<CrewOutput> {
        let question = Question::new(raw_question)?;
        tracing::debug!(question = %question, "Question accepted");
        *state = state.transition(RunEvent::QuestionAccepted)?;

        let research_input = ResearchInput {
            question: question.clone(),
        };
        let (answer, research_task) = self
            .run_stage(&self.researcher, &research_input, question.as_str())
            .await?;
        let research_task = research_task.with_output(answer.text());
        *state = state.transition(RunEvent::AnswerReady)?;

        let writing_input = WritingInput {
            answer: answer.clone(),
        };
        let (email, writing_task) = self
            .run_stage(&self.writer, &writing_input, answer.text())
            .await?;
        let writing_task = writing_task.with_output(email.as_str());
        *state = state.transition(RunEvent::EmailReady)?;

        Ok(CrewOutput {
            run_id,
            question,
            answer,
            email,
            tasks_output: vec![research_task, writing_task],
        })
    }

    /// Run one stage under the crew's timeout, timing it
    async fn run_stage<S: Stage>(
        &self,
        stage: &S,
        input: &S::Input,
        input_text: &str,
    ) -> Result<(S::Output, TaskOutput)> {
        let timestamp = Utc::now();
        let started = Instant::now();
        tracing::info!(stage = stage.name(), agent = %stage.profile().role, "Stage started");

        let output = tokio::time::timeout(self.stage_timeout, stage.run(input))
            .await
            .map_err(|_| AppError::StageTimeout {
                stage: stage.name().to_string(),
                timeout_ms: self.stage_timeout.as_millis() as u64,
            })??;

        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(stage = stage.name(), duration_ms, "Stage finished");

        Ok((
            output,
            TaskOutput {
                stage: stage.name().to_string(),
                agent: stage.profile().role.clone(),
                input: input_text.to_string(),
                output: String::new(),
                timestamp,
                duration_ms,
            },
        ))
    }
}

impl TaskOutput {
    fn with_output(mut self, output: &str) -> Self {
        self.output = output.to_string();
        self
    }
}
