use crate::error::PipelineError;
use crate::pipeline::agent::Agent;
use crate::pipeline::task::{Task, TaskOutput, TaskResult};
use std::sync::Arc;

/// Where a crew run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrewState {
    Pending,
    Running(usize),
    Completed,
    Failed,
}

/// The overall result of a run: the terminal task's text, plus the full
/// per-task history for callers that want to inspect intermediate outputs
/// or the execution outcome of a generated artifact.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub text: String,
    pub task_results: Vec<TaskResult>,
}

/// The sequential task graph.
///
/// Tasks run strictly in declared order; each one's prompt is extended
/// with the outputs of every predecessor. This is a linear chain by
/// design, not a general DAG: no branching, no skipping, no parallel
/// tasks, no retry. The prior-context accumulator is owned here and only
/// grows at task boundaries.
pub struct Crew {
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    state: CrewState,
}

impl Crew {
    pub fn new(agents: Vec<Arc<Agent>>, tasks: Vec<Task>) -> Self {
        Crew {
            agents,
            tasks,
            state: CrewState::Pending,
        }
    }

    pub fn state(&self) -> CrewState {
        self.state
    }

    /// Run every task in order. The first failure moves the crew to
    /// `Failed` and propagates the cause; no later task is attempted,
    /// since each depends on the evidence and outputs before it.
    pub async fn execute(&mut self) -> Result<PipelineResult, PipelineError> {
        log::info!(
            "[CREW] starting run: {} tasks, {} agents",
            self.tasks.len(),
            self.agents.len()
        );

        let mut prior: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        let mut results: Vec<TaskResult> = Vec::with_capacity(self.tasks.len());

        for (index, task) in self.tasks.iter().enumerate() {
            self.state = CrewState::Running(index);
            log::info!(
                "[CREW] task {}/{}: {}",
                index + 1,
                self.tasks.len(),
                task.description()
            );

            match task.run(&prior).await {
                Ok(result) => {
                    prior.push(TaskOutput {
                        description: task.description().to_string(),
                        text: result.text.clone(),
                    });
                    results.push(result);
                }
                Err(err) => {
                    self.state = CrewState::Failed;
                    log::error!("[CREW] task {} aborted the run: {}", index + 1, err);
                    return Err(err);
                }
            }
        }

        self.state = CrewState::Completed;
        let text = results.last().map(|r| r.text.clone()).unwrap_or_default();
        log::info!("[CREW] run completed, terminal output {} chars", text.len());
        Ok(PipelineResult {
            text,
            task_results: results,
        })
    }
}
