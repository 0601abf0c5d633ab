//! Crew Orchestration Module
//!
//! A [`Crew`] runs the research stage and then the writing stage for a single
//! customer question. Stages never overlap and the writing stage only starts
//! once research produced an answer.
//!
//! # Configuration
//!
//! The per-stage timeout is set in `workorder.toml`:
//!
//! ```toml
//! [crew]
//! stage_timeout_secs = 120
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let crew = Crew::new(researcher, writer).with_stage_timeout(config.stage_timeout());
//! let output = crew.kickoff("Roof").await?;
//! println!("{}", output.email);
//! ```

pub mod engine;

pub use engine::{Crew, CrewOutput, RunEvent, RunState, TaskOutput, DEFAULT_STAGE_TIMEOUT};
