//! Running generated artifacts and cleaning model formatting off them.

use serde::Serialize;
use std::path::Path;
use tokio::process::Command;

/// Outcome of running a generated program.
///
/// A failed run never aborts the pipeline: the artifact is already
/// persisted and inspectable, so the outcome is attached to the task
/// result instead.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    /// None when the process could not be spawned or died to a signal.
    pub exit_code: Option<i32>,
}

impl ExecutionOutcome {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run `runtime program` and capture its output. Spawn failures are folded
/// into the outcome rather than raised; the sandboxing guarantees of the
/// runtime are the runtime's responsibility.
pub async fn run_program(runtime: &str, program: &Path) -> ExecutionOutcome {
    log::info!("[EXEC] running {} {}", runtime, program.display());
    match Command::new(runtime).arg(program).output().await {
        Ok(output) => {
            let outcome = ExecutionOutcome {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                exit_code: output.status.code(),
            };
            log::info!("[EXEC] exited with {:?}", outcome.exit_code);
            outcome
        }
        Err(e) => ExecutionOutcome {
            stdout: String::new(),
            stderr: format!("failed to spawn '{}': {}", runtime, e),
            exit_code: None,
        },
    }
}

/// Strip decorative Markdown fences the model may have wrapped code in,
/// so the persisted artifact is directly executable.
pub fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    // Drop the info string (```python etc.) on the opening fence line.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => return String::new(),
    };
    // Keep only what sits inside the fence; anything after the closing
    // fence line is commentary, not code.
    match body.find("\n```") {
        Some(end) => body[..end].trim_end().to_string(),
        None => body.trim_end().trim_end_matches("```").trim_end().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("  print('hi')\n"), "print('hi')");
    }

    #[test]
    fn fences_with_language_tag_are_stripped() {
        let fenced = "```python\nprint('hi')\nprint('bye')\n```\n";
        assert_eq!(strip_code_fences(fenced), "print('hi')\nprint('bye')");
    }

    #[test]
    fn bare_fences_are_stripped() {
        assert_eq!(strip_code_fences("```\ncode\n```"), "code");
    }

    #[test]
    fn prose_after_closing_fence_is_dropped() {
        let reply = "```python\nprint('hi')\n```\nRun this with python3.";
        assert_eq!(strip_code_fences(reply), "print('hi')");
    }

    #[test]
    fn stripping_is_idempotent() {
        let fenced = "```python\nx = 1\n```";
        let once = strip_code_fences(fenced);
        assert_eq!(strip_code_fences(&once), once);
    }

    #[tokio::test]
    async fn missing_runtime_folds_into_outcome() {
        let outcome = run_program("definitely-not-a-runtime", Path::new("x.py")).await;
        assert!(!outcome.succeeded());
        assert_eq!(outcome.exit_code, None);
        assert!(outcome.stderr.contains("failed to spawn"));
    }

    #[tokio::test]
    async fn captures_stdout_and_exit_code() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"echo generated").unwrap();

        let outcome = run_program("sh", file.path()).await;
        assert!(outcome.succeeded());
        assert!(outcome.stdout.contains("generated"));
    }
}
