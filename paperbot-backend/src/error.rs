//! Error taxonomy for the replication pipeline.
//!
//! Everything below the crew is either recovered into a task result
//! (execution outcomes of generated artifacts) or propagated as one of
//! these terminating faults. There is no retry policy and no partial
//! resumption: a failed run restarts from the first task.

use thiserror::Error;

/// A declared tool could not produce evidence.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The document path did not resolve to readable text.
    #[error("document not found or unreadable: {path}")]
    NotFound { path: String },

    /// The documentation target could not be fetched or yielded nothing usable.
    #[error("documentation target unavailable: {target}: {reason}")]
    Unavailable { target: String, reason: String },
}

/// The completion backend could not produce a response.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion backend misconfigured: {0}")]
    Configuration(String),

    #[error("completion API error: {0}")]
    Api(String),

    #[error("completion request failed")]
    Http(#[from] reqwest::Error),
}

/// Terminating faults of a crew run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Unusable model or agent setup. Fatal before any task runs, and
    /// how completion-backend failures surface to the caller.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A tool failed while gathering evidence. Fatal to the owning task
    /// and, by propagation, to the whole crew: later tasks depend on the
    /// missing evidence, so there is no partial-credit continuation.
    #[error("tool '{tool}' failed for task '{task}'")]
    Tool {
        tool: String,
        task: String,
        #[source]
        source: ToolError,
    },

    /// Code execution was requested from an agent without the permission flag.
    #[error("agent '{role}' is not permitted to execute code")]
    Permission { role: String },

    #[error("i/o error")]
    Io(#[from] std::io::Error),
}

impl From<CompletionError> for PipelineError {
    fn from(err: CompletionError) -> Self {
        PipelineError::Configuration(err.to_string())
    }
}
