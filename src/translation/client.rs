/*!
 * Prompt construction and the shared generation call path.
 *
 * Both translation directions and the difference analysis go through one
 * `request_text` helper that performs the provider call, logs failures and
 * cleans the response (trimming plus reasoning-span removal). A failed call
 * surfaces as `None`; the pipeline treats absence as the failure signal and
 * never retries.
 */

use std::sync::Arc;

use log::{debug, error, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProviderError;
use crate::providers::GenerationProvider;

// @const: Reasoning spans emitted by thinking models, stripped from responses
static REASONING_SPAN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<think>.*?</think>").unwrap()
});

/// Remove `<think>...</think>` reasoning spans from a response.
///
/// Matching is non-greedy and spans newlines; only matched pairs are
/// removed, a lone opening or closing tag stays in place. The result is
/// trimmed of surrounding whitespace.
pub fn strip_reasoning_spans(text: &str) -> String {
    REASONING_SPAN_REGEX.replace_all(text.trim(), "").trim().to_string()
}

/// Shared call path for all generation requests: invoke the provider, clean
/// the response, and collapse every failure into `None` after logging it.
/// An empty response after cleanup counts as a failure too.
pub(crate) async fn request_text<P: GenerationProvider>(
    provider: &P,
    model: &str,
    prompt: &str,
) -> Option<String> {
    match provider.generate_text(model, prompt).await {
        Ok(raw) => {
            let cleaned = strip_reasoning_spans(&raw);
            if cleaned.is_empty() {
                warn!("{} returned an empty response from model '{}'", provider.name(), model);
                return None;
            }
            Some(cleaned)
        },
        Err(ProviderError::ParseError(e)) => {
            error!("Invalid response format from {}: {}", provider.name(), e);
            None
        },
        Err(e) => {
            error!("Generation request to {} failed: {}", provider.name(), e);
            None
        },
    }
}

/// Client for the forward and backward translation calls
#[derive(Debug)]
pub struct TranslationClient<P> {
    /// Generation backend, shared with the analyzer
    provider: Arc<P>,
    /// Model used for both translation directions
    model: String,
}

impl<P: GenerationProvider> TranslationClient<P> {
    /// Create a new translation client on the given model
    pub fn new(provider: Arc<P>, model: impl Into<String>) -> Self {
        TranslationClient {
            provider,
            model: model.into(),
        }
    }

    /// Translate text into the target language.
    ///
    /// Returns the cleaned translation, or `None` when the service call
    /// failed or its response was unusable. The failure is already logged.
    pub async fn translate(&self, text: &str, target_language: &str) -> Option<String> {
        let prompt = format!("Translate the following text to {}: {}", target_language, text);
        debug!("Requesting translation to {} ({} chars)", target_language, text.len());
        request_text(self.provider.as_ref(), &self.model, &prompt).await
    }
}

/// Analyzer producing the difference report for one round-tripped segment
#[derive(Debug)]
pub struct DiffAnalyzer<P> {
    /// Generation backend, shared with the client
    provider: Arc<P>,
    /// Model used for the comparison step
    model: String,
}

impl<P: GenerationProvider> DiffAnalyzer<P> {
    /// Create a new analyzer on the given comparison model
    pub fn new(provider: Arc<P>, model: impl Into<String>) -> Self {
        DiffAnalyzer {
            provider,
            model: model.into(),
        }
    }

    /// Compare the original text with its back-translation sentence by
    /// sentence and mark the clear discrepancies on the translated text.
    ///
    /// Returns the report, or `None` when the call failed - logged, not
    /// fatal, since a missing report only degrades one segment's output.
    pub async fn analyze(&self, original: &str, back_translated: &str, translated: &str) -> Option<String> {
        let prompt = format!(
            "You are a back-translation comparison assistant. Compare the original text \
             with the back-translated text sentence by sentence, point out clear \
             discrepancies and mark them on the translated text\n\
             Original text: {}\n\
             Back-translated text: {}\n\
             Translated text: {}",
            original, back_translated, translated
        );
        debug!("Requesting difference analysis ({} original chars)", original.len());
        request_text(self.provider.as_ref(), &self.model, &prompt).await
    }
}
