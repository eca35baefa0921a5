//! End-to-end crew scenarios with a scripted completion backend and stub
//! tools, covering sequencing, persistence, execution, and failure
//! propagation without touching the network.

use async_trait::async_trait;
use paperbot_backend::ai::{CompletionBackend, Message};
use paperbot_backend::error::{CompletionError, PipelineError, ToolError};
use paperbot_backend::pipeline::{Agent, Crew, CrewState, Task};
use paperbot_backend::tools::Tool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replies with a canned response per call and records every prompt.
struct ScriptedBackend {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(ScriptedBackend {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompt(&self, call: usize) -> String {
        self.prompts.lock().unwrap()[call].clone()
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, messages: Vec<Message>) -> Result<String, CompletionError> {
        let body = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n---\n");
        self.prompts.lock().unwrap().push(body);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CompletionError::Api("scripted backend exhausted".to_string()))
    }
}

struct StaticTool {
    name: &'static str,
    output: &'static str,
}

#[async_trait]
impl Tool for StaticTool {
    fn name(&self) -> &str {
        self.name
    }

    async fn invoke(&self, _task_context: &str) -> Result<String, ToolError> {
        Ok(self.output.to_string())
    }
}

struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "document_reader"
    }

    async fn invoke(&self, _task_context: &str) -> Result<String, ToolError> {
        Err(ToolError::NotFound {
            path: "missing.pdf".to_string(),
        })
    }
}

#[tokio::test]
async fn four_task_pipeline_produces_executed_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("replicated.sh");

    let backend = ScriptedBackend::new(&[
        "the paper describes a numeric web service",
        "framework summary: request handlers",
        "numerics summary: quadrature and moments",
        "```sh\necho replicated\n```",
    ]);

    let analyzer = Arc::new(Agent::new(
        "Code Analyzer",
        "analyze",
        "reads papers",
        backend.clone(),
    ));
    let coder = Arc::new(
        Agent::new("Senior Developer", "code", "writes scripts", backend.clone())
            .with_code_execution(),
    );

    let tasks = vec![
        Task::new("read the document", "an analysis", analyzer.clone()).with_tool(Arc::new(
            StaticTool {
                name: "document_reader",
                output: "lecture text",
            },
        )),
        Task::new("search framework docs", "a summary", analyzer.clone()).with_tool(Arc::new(
            StaticTool {
                name: "docs_search",
                output: "handler passages",
            },
        )),
        Task::new("search numerics docs", "a summary", analyzer.clone()).with_tool(Arc::new(
            StaticTool {
                name: "docs_search",
                output: "quadrature passages",
            },
        )),
        Task::new("generate the script", "executable code", coder.clone())
            .with_output_file(&output)
            .executable_artifact("sh"),
    ];

    let mut crew = Crew::new(vec![analyzer, coder], tasks);
    let result = crew.execute().await.unwrap();

    assert_eq!(crew.state(), CrewState::Completed);
    assert_eq!(result.text, "echo replicated");
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "echo replicated");

    let terminal = result.task_results.last().unwrap();
    let outcome = terminal.execution.as_ref().unwrap();
    assert!(outcome.succeeded());
    assert!(outcome.stdout.contains("replicated"));

    // Earlier tasks never ran anything.
    assert!(result.task_results[..3].iter().all(|r| r.execution.is_none()));

    // Completion timestamps follow the run order.
    assert!(
        result
            .task_results
            .windows(2)
            .all(|pair| pair[0].completed_at <= pair[1].completed_at)
    );
}

#[tokio::test]
async fn prompts_accumulate_prior_outputs_in_order_and_never_later_ones() {
    let backend = ScriptedBackend::new(&["out-0", "out-1", "out-2"]);
    let agent = Arc::new(Agent::new("Analyzer", "analyze", "", backend.clone()));

    let tasks = vec![
        Task::new("task zero", "text", agent.clone()),
        Task::new("task one", "text", agent.clone()),
        Task::new("task two", "text", agent.clone()),
    ];

    let mut crew = Crew::new(vec![agent], tasks);
    crew.execute().await.unwrap();

    let first = backend.prompt(0);
    assert!(!first.contains("out-0") && !first.contains("out-1"));

    let second = backend.prompt(1);
    assert!(second.contains("out-0"));
    assert!(!second.contains("out-1") && !second.contains("out-2"));

    let third = backend.prompt(2);
    let zero = third.find("out-0").unwrap();
    let one = third.find("out-1").unwrap();
    assert!(zero < one);
    assert!(!third.contains("out-2"));
}

#[tokio::test]
async fn tool_failure_fails_the_crew_before_any_later_work() {
    let backend = ScriptedBackend::new(&["never used", "never used"]);
    let agent = Arc::new(Agent::new("Analyzer", "analyze", "", backend.clone()));

    let tasks = vec![
        Task::new("read the document", "an analysis", agent.clone())
            .with_tool(Arc::new(FailingTool)),
        Task::new("summarize", "a summary", agent.clone()),
    ];

    let mut crew = Crew::new(vec![agent], tasks);
    let err = crew.execute().await.unwrap_err();

    assert_eq!(crew.state(), CrewState::Failed);
    assert!(matches!(
        err,
        PipelineError::Tool { ref tool, .. } if tool == "document_reader"
    ));
    // The failing task aborted before prompting, and the second task never ran.
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn execution_without_permission_fails_but_leaves_artifact_intact() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("generated.py");

    let backend = ScriptedBackend::new(&["print('generated')"]);
    let agent = Arc::new(Agent::new("Analyzer", "analyze", "", backend.clone()));

    let tasks = vec![
        Task::new("generate", "code", agent.clone())
            .with_output_file(&output)
            .executable_artifact("python3"),
    ];

    let mut crew = Crew::new(vec![agent], tasks);
    let err = crew.execute().await.unwrap_err();

    assert_eq!(crew.state(), CrewState::Failed);
    assert!(matches!(err, PipelineError::Permission { ref role } if role == "Analyzer"));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "print('generated')"
    );
}

#[tokio::test]
async fn failed_execution_does_not_invalidate_the_result() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("broken.sh");

    let backend = ScriptedBackend::new(&["exit 3"]);
    let coder = Arc::new(
        Agent::new("Senior Developer", "code", "", backend.clone()).with_code_execution(),
    );

    let tasks = vec![
        Task::new("generate", "code", coder.clone())
            .with_output_file(&output)
            .executable_artifact("sh"),
    ];

    let mut crew = Crew::new(vec![coder], tasks);
    let result = crew.execute().await.unwrap();

    assert_eq!(crew.state(), CrewState::Completed);
    assert_eq!(result.text, "exit 3");
    let outcome = result.task_results[0].execution.as_ref().unwrap();
    assert!(!outcome.succeeded());
    assert_eq!(outcome.exit_code, Some(3));
}
