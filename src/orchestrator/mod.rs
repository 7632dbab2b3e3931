//! The story workflow: connect, select, generate, create issues, push code.

pub mod runner;
pub mod session;

pub use runner::{Orchestrator, RunOutcome, RunReport};
pub use session::{DeliveryPlan, PresetRejection, RequiredInput, SessionState, StoryRequest};
