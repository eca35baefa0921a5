use crate::error::ToolError;
use crate::tools::Tool;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads a named document and returns its textual content.
///
/// Format-specific extraction (pulling text out of a PDF, say) is an
/// external capability. This tool surfaces whatever text the file decodes
/// to; a missing file or undecodable content both report as not found,
/// since either way there is no readable document at the path.
pub struct DocumentReaderTool {
    path: PathBuf,
}

impl DocumentReaderTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DocumentReaderTool { path: path.into() }
    }
}

#[async_trait]
impl Tool for DocumentReaderTool {
    fn name(&self) -> &str {
        "document_reader"
    }

    async fn invoke(&self, _task_context: &str) -> Result<String, ToolError> {
        let path_display = self.path.display().to_string();
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            log::warn!("[TOOL] document_reader: {}: {}", path_display, e);
            ToolError::NotFound {
                path: path_display.clone(),
            }
        })?;

        match String::from_utf8(bytes) {
            Ok(text) if !text.trim().is_empty() => {
                log::info!(
                    "[TOOL] document_reader: read {} chars from {}",
                    text.len(),
                    path_display
                );
                Ok(text)
            }
            _ => Err(ToolError::NotFound { path: path_display }),
        }
    }
}
