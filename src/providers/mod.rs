/*!
 * Provider implementation for the text-generation service.
 *
 * This module contains the client for the Ollama generation API together
 * with the trait the translation pipeline talks through:
 * - Ollama: Local LLM server
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for text-generation providers
///
/// This trait defines the single seam between the translation pipeline and
/// the generation backend, so the backend can be swapped or scripted in
/// tests.
#[async_trait]
pub trait GenerationProvider: Send + Sync + Debug {
    /// Submit one prompt to the given model and return the raw generated text
    ///
    /// # Arguments
    /// * `model` - Identifier of the model to generate with
    /// * `prompt` - The full prompt to complete
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw response text or an error
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Human-readable name of the provider, for log lines
    fn name(&self) -> &str;
}

pub mod ollama;
