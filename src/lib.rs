//! Readmint - README generation from static source analysis.
//!
//! Readmint scans a source tree, extracts lightweight structural facts
//! (imports, exports, function/class names, SQL-like string literals,
//! route declarations, Kubernetes resource manifests) with regular
//! expressions, and feeds those facts as context into a templated call to
//! a text-generation model to produce a README document.
//!
//! # Architecture
//!
//! - `extract`: regex-based structural extraction (no parser, no AST)
//! - `cache`: hash-validated per-file result cache
//! - `analyzer`: bounded parallel analysis with progress reporting
//! - `project`: aggregation of file facts, manifest and deployment data
//! - `llm`: text-generation client port with an Ollama adapter
//! - `render`: minijinja README template
//! - `config`: YAML run configuration with defaults
//!
//! Control flow: aggregator -> analyzer -> (cache | extractor) ->
//! aggregator -> generator -> renderer.

pub mod analyzer;
pub mod cache;
pub mod cli;
pub mod config;
pub mod extract;
pub mod facts;
pub mod llm;
pub mod project;
pub mod render;

pub use analyzer::{Analyzer, ProgressReport, ProgressSink};
pub use cache::AnalysisCache;
pub use config::Config;
pub use facts::{FileAnalysis, FileFacts, Route};
pub use llm::{GenerateError, GeneratedProse, OllamaClient, TextGenerator};
pub use project::{aggregate, ProjectRecord};
pub use render::render_readme;
