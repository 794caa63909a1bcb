/*!
 * # echomark - Round-trip translation verifier for Markdown documents
 *
 * A Rust library for translating text documents with a local LLM and
 * verifying the result through back-translation.
 *
 * ## Features
 *
 * - Token-budgeted, line-preserving document segmentation
 * - Forward translation and verification back-translation per segment
 * - Model-generated difference reports marking round-trip discrepancies
 * - Reasoning-span (`<think>`) filtering for thinking models
 * - Single-flush output protocol: one save per run, after the last segment
 * - Ollama API client (local LLM server)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: Document model, token estimation and segmentation
 * - `translation`: Round-trip translation over a generation provider:
 *   - `translation::client`: Prompt construction and response cleanup
 *   - `translation::unit`: The three-stage per-segment unit
 * - `pipeline`: The sequential runner and its run report
 * - `session`: Document source/sink capabilities for one run
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementation for the generation backend:
 *   - `providers::ollama`: Ollama API client
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod language_utils;
pub mod pipeline;
pub mod providers;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use document::{Document, Segment, estimate_tokens};
pub use errors::{AppError, ConfigError, ProviderError, SinkError, SourceError};
pub use pipeline::{PipelineRunner, RunPhase, RunProgress, RunReport, RunStatus, SegmentContribution};
pub use providers::GenerationProvider;
pub use session::{DocumentSink, DocumentSource, FileSink, FileSource, Session};
pub use translation::{DiffAnalyzer, TranslationClient, TranslationOutcome, TranslationUnit};
