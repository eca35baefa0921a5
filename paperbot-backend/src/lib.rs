//! PaperBot: a two-stage agent pipeline that reads a source document,
//! studies external reference documentation, and replicates the code the
//! document describes into an executable artifact.
//!
//! The crate has two halves:
//! - `pipeline` (with `ai` and `tools`): the orchestration core of agents,
//!   tasks, and the sequential crew that runs them.
//! - `service`: the small numeric web service the pipeline is meant to
//!   replicate, kept here as the reference downstream artifact.

pub mod ai;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod tools;
