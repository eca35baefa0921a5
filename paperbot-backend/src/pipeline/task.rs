use crate::ai::Message;
use crate::error::PipelineError;
use crate::pipeline::agent::Agent;
use crate::pipeline::executor::{ExecutionOutcome, strip_code_fences};
use crate::tools::Tool;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;

/// A completed task's output, as its successors see it.
#[derive(Debug, Clone)]
pub struct TaskOutput {
    pub description: String,
    pub text: String,
}

/// Result of one task execution.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub text: String,
    /// Present when the task produced and ran an executable artifact. A
    /// failed run lives here too; it does not invalidate the text.
    pub execution: Option<ExecutionOutcome>,
    pub completed_at: DateTime<Utc>,
}

/// One unit of orchestrated work: a description, an expected-output
/// contract, exactly one assigned agent, optional tools and an optional
/// persistence destination. Immutable once built; re-running with
/// different inputs means constructing a new task.
pub struct Task {
    description: String,
    expected_output: String,
    agent: Arc<Agent>,
    tools: Vec<Arc<dyn Tool>>,
    output_file: Option<PathBuf>,
    produces_executable_artifact: bool,
    runtime: String,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: Arc<Agent>,
    ) -> Self {
        Task {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            tools: Vec::new(),
            output_file: None,
            produces_executable_artifact: false,
            runtime: String::new(),
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Declare that this task's output is an executable program to be run
    /// with `runtime` after persistence. An explicit flag set at assembly
    /// time; whether an output "looks like code" is never inferred.
    pub fn executable_artifact(mut self, runtime: impl Into<String>) -> Self {
        self.produces_executable_artifact = true;
        self.runtime = runtime.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Invoke declared tools in declaration order and concatenate their
    /// outputs into one evidence block. Any tool failure aborts the task.
    async fn gather_evidence(&self) -> Result<Option<String>, PipelineError> {
        if self.tools.is_empty() {
            return Ok(None);
        }
        let mut blocks = Vec::with_capacity(self.tools.len());
        for tool in &self.tools {
            log::info!("[TASK] invoking tool '{}'", tool.name());
            let output = tool.invoke(&self.description).await.map_err(|source| {
                PipelineError::Tool {
                    tool: tool.name().to_string(),
                    task: self.description.clone(),
                    source,
                }
            })?;
            blocks.push(format!("### {}\n{}", tool.name(), output));
        }
        Ok(Some(blocks.join("\n\n")))
    }

    /// Assemble the prompt: persona, then description, contract, tool
    /// evidence, and every prior output in completion order.
    fn build_prompt(&self, evidence: Option<&str>, prior: &[TaskOutput]) -> Vec<Message> {
        let mut body = format!(
            "Task: {}\n\nExpected output: {}\n",
            self.description, self.expected_output
        );
        if let Some(evidence) = evidence {
            body.push_str("\n## Evidence\n\n");
            body.push_str(evidence);
            body.push('\n');
        }
        if !prior.is_empty() {
            body.push_str("\n## Results of previous tasks\n");
            for output in prior {
                body.push_str(&format!("\n### {}\n{}\n", output.description, output.text));
            }
        }
        vec![self.agent.persona(), Message::user(body)]
    }

    pub async fn run(&self, prior: &[TaskOutput]) -> Result<TaskResult, PipelineError> {
        let evidence = self.gather_evidence().await?;
        let prompt = self.build_prompt(evidence.as_deref(), prior);
        let raw = self.agent.respond(prompt).await?;

        // Persisted content must be directly usable, so formatting
        // artifacts come off before the write; the result text matches
        // the file exactly.
        let text = if self.output_file.is_some() {
            strip_code_fences(&raw)
        } else {
            raw
        };

        if let Some(path) = &self.output_file {
            tokio::fs::write(path, &text).await?;
            log::info!("[TASK] wrote {} bytes to {}", text.len(), path.display());
        }

        let execution = if self.produces_executable_artifact {
            let path = self.output_file.as_ref().ok_or_else(|| {
                PipelineError::Configuration(
                    "executable task declared without an output file".to_string(),
                )
            })?;
            let outcome = self.agent.execute(path, &self.runtime).await?;
            if !outcome.succeeded() {
                log::warn!(
                    "[TASK] artifact execution failed (exit {:?}): {}",
                    outcome.exit_code,
                    outcome.stderr.trim()
                );
            }
            Some(outcome)
        } else {
            None
        };

        Ok(TaskResult {
            text,
            execution,
            completed_at: Utc::now(),
        })
    }
}
