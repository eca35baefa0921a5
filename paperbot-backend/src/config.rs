use crate::error::PipelineError;
use std::env;

/// Process/environment configuration for the pipeline binary.
///
/// Defaults mirror the canonical replication run: a lecture PDF, the web
/// framework and numerics documentation, and a Python artifact executed
/// with `python3`.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub paper_path: String,
    pub api_docs_url: String,
    pub numeric_docs_url: String,
    pub output_file: String,
    pub runtime: String,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, PipelineError> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let endpoint = env::var("LLM_ENDPOINT").ok().filter(|v| !v.is_empty());
        if api_key.is_empty() && endpoint.is_none() {
            return Err(PipelineError::Configuration(
                "OPENAI_API_KEY must be set (or LLM_ENDPOINT for a keyless backend)".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            endpoint,
            model: env::var("LLM_MODEL").ok().filter(|v| !v.is_empty()),
            paper_path: env::var("PAPER_PATH").unwrap_or_else(|_| "Lect-7-DM.pdf".to_string()),
            api_docs_url: env::var("API_DOCS_URL")
                .unwrap_or_else(|_| "https://fastapi.tiangolo.com/".to_string()),
            numeric_docs_url: env::var("NUMERIC_DOCS_URL").unwrap_or_else(|_| {
                "https://docs.scipy.org/doc/scipy/tutorial/index.html".to_string()
            }),
            output_file: env::var("OUTPUT_FILE")
                .unwrap_or_else(|_| "replicated_gen.py".to_string()),
            runtime: env::var("ARTIFACT_RUNTIME").unwrap_or_else(|_| "python3".to_string()),
            request_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
        })
    }
}
