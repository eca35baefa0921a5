//! Pipeline binary: assemble the analyzer/coder crew and run it once.
//!
//! Usage:
//!   OPENAI_API_KEY="sk-..." \
//!   PAPER_PATH="Lect-7-DM.pdf" \
//!   cargo run

use dotenv::dotenv;
use paperbot_backend::ai::OpenAiClient;
use paperbot_backend::config::Config;
use paperbot_backend::pipeline::{Agent, Crew, Task};
use paperbot_backend::tools::{DocsSearchTool, DocumentReaderTool};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("[MAIN] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let backend = match OpenAiClient::new(
        &config.api_key,
        config.endpoint.as_deref(),
        config.model.as_deref(),
        config.request_timeout_secs,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            log::error!("[MAIN] {}", e);
            return ExitCode::FAILURE;
        }
    };

    let analyzer = Arc::new(Agent::new(
        "Code Analyzer",
        "Analyze documents and provide relevant code insights.",
        "You are an expert developer tasked with reading and analyzing a scientific \
         paper provided as a document. You are responsible for analyzing the code in \
         the paper or translating what it says into code, using the web framework and \
         numerics documentation so that the code can be implemented as a script.",
        backend.clone(),
    ));

    let coder = Arc::new(
        Agent::new(
            "Senior Developer",
            "Generate code based on what is described in the analysis and put it in an executable file.",
            "You are a senior developer with extensive experience in translating \
             documentation and analysis into clean, executable code. You must only \
             replicate the code detailed in the document, using the framework and \
             numerics documentation, as a well-documented executable script. You will \
             execute it once you finish writing it.",
            backend.clone(),
        )
        .with_code_execution(),
    );

    let tasks = vec![
        Task::new(
            "Read the provided document and analyze the code described in it or translate what it says into code.",
            "A detailed analysis of the code in the document.",
            analyzer.clone(),
        )
        .with_tool(Arc::new(DocumentReaderTool::new(&config.paper_path))),
        Task::new(
            "Fetch and analyze the web framework documentation.",
            "A summary of the key documentation points relevant to the code.",
            analyzer.clone(),
        )
        .with_tool(Arc::new(DocsSearchTool::new(&config.api_docs_url))),
        Task::new(
            "Fetch and analyze the numerics library documentation.",
            "A summary of the key documentation points relevant to the code.",
            analyzer.clone(),
        )
        .with_tool(Arc::new(DocsSearchTool::new(&config.numeric_docs_url))),
        Task::new(
            "Generate an executable script based on the document, web framework, and \
             numerics documentation analysis. The code should implement the core \
             functionality described and be well-documented. The output should be \
             valid code, not a description.",
            "A valid, executable script implementing the functionality described in \
             the document, with clear comments and code structure. No descriptions, \
             just the actual code.",
            coder.clone(),
        )
        .with_output_file(&config.output_file)
        .executable_artifact(&config.runtime),
    ];

    let mut crew = Crew::new(vec![analyzer, coder], tasks);
    match crew.execute().await {
        Ok(result) => {
            println!("{}", result.text);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("[MAIN] pipeline failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
