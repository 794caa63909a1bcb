/*!
 * Round-trip translation over a text-generation provider.
 *
 * This module contains the translation side of the pipeline, split into
 * two submodules:
 *
 * - `client`: Prompt construction and the shared generation call path
 *   (response cleanup, reasoning-span stripping), plus the difference
 *   analyzer
 * - `unit`: The three-stage unit driving one segment through forward
 *   translation, back-translation and difference analysis
 */

// Re-export main types for easier usage
pub use self::client::{DiffAnalyzer, TranslationClient, strip_reasoning_spans};
pub use self::unit::{TranslationOutcome, TranslationUnit};

// Submodules
pub mod client;
pub mod unit;
