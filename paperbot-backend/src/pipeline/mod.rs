//! The orchestration core: agents, tasks, and the sequential crew.
//!
//! A crew runs its tasks in declared order, feeding each task the
//! accumulated outputs of every predecessor. Tasks gather evidence from
//! their tools, prompt their agent, persist their output when asked to,
//! and run the persisted artifact when the task is declared executable.

pub mod agent;
pub mod crew;
pub mod executor;
pub mod task;

pub use agent::Agent;
pub use crew::{Crew, CrewState, PipelineResult};
pub use executor::{ExecutionOutcome, strip_code_fences};
pub use task::{Task, TaskOutput, TaskResult};
