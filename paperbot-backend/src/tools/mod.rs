//! Read-only capabilities a task may invoke before prompting its agent.

pub mod docs_search;
pub mod document_reader;

pub use docs_search::DocsSearchTool;
pub use document_reader::DocumentReaderTool;

use crate::error::ToolError;
use async_trait::async_trait;

/// A capability invocable by a task. Stateless per invocation.
///
/// `task_context` is the description of the owning task; tools that judge
/// relevance (documentation search) use it to pick passages, tools that
/// read a fixed source ignore it.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke(&self, task_context: &str) -> Result<String, ToolError>;
}
