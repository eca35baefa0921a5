use crate::ai::{CompletionBackend, Message};
use crate::error::PipelineError;
use crate::pipeline::executor::{self, ExecutionOutcome};
use std::path::Path;
use std::sync::Arc;

/// A configured role with a persona and a bound completion backend.
///
/// Constructed once and reused by every task assigned to it. Stateless
/// across invocations apart from whatever the backend itself retains.
#[derive(Clone)]
pub struct Agent {
    role: String,
    goal: String,
    backstory: String,
    backend: Arc<dyn CompletionBackend>,
    allow_code_execution: bool,
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        Agent {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            backend,
            allow_code_execution: false,
        }
    }

    /// Permit this agent to run code it produces.
    pub fn with_code_execution(mut self) -> Self {
        self.allow_code_execution = true;
        self
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn can_execute_code(&self) -> bool {
        self.allow_code_execution
    }

    /// Render the persona as the system message. The record is passed
    /// through uniformly; orchestration never branches on its content.
    pub fn persona(&self) -> Message {
        Message::system(format!(
            "You are {}.\nGoal: {}\n{}",
            self.role, self.goal, self.backstory
        ))
    }

    pub async fn respond(&self, prompt: Vec<Message>) -> Result<String, PipelineError> {
        log::debug!(
            "[AGENT] '{}' prompted with {} messages",
            self.role,
            prompt.len()
        );
        Ok(self.backend.complete(prompt).await?)
    }

    /// Run a persisted artifact with the given runtime. Fails without side
    /// effects when the agent lacks the execution permission flag.
    pub async fn execute(
        &self,
        program: &Path,
        runtime: &str,
    ) -> Result<ExecutionOutcome, PipelineError> {
        if !self.allow_code_execution {
            return Err(PipelineError::Permission {
                role: self.role.clone(),
            });
        }
        Ok(executor::run_program(runtime, program).await)
    }
}
