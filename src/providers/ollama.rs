use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::GenerationProvider;
use crate::errors::ProviderError;

/// Ollama client for interacting with the Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new generation request; the response is requested unstreamed
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: Some(false),
        }
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(60))
    }

    /// Create a new Ollama client with a per-request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let url = url.into();
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Generate text from the Ollama API
    ///
    /// One attempt per call: a transport error, a non-success status or an
    /// undecodable body is final and surfaces as a `ProviderError`.
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Ollama API returned error status {}: {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        // Get the raw response text first so a parse failure can be logged
        let response_text = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to get response text from Ollama API: {}", e)))?;

        match serde_json::from_str::<GenerationResponse>(&response_text) {
            Ok(generated_response) => {
                debug!("Ollama generation done: ~{} prompt tokens, ~{} response tokens",
                       generated_response.prompt_eval_count.unwrap_or(0),
                       generated_response.eval_count.unwrap_or(0));
                Ok(generated_response)
            },
            Err(e) => {
                error!("Failed to parse Ollama API response: {}. Raw response (first 500 chars): {}",
                       e, if response_text.chars().count() > 500 {
                           response_text.chars().take(500).collect::<String>()
                       } else {
                           response_text.clone()
                       });
                Err(ProviderError::ParseError(e.to_string()))
            }
        }
    }

    /// Get the version of the Ollama server - a cheap connectivity probe
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response: serde_json::Value = self.client.get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to connect to Ollama: {}", e)))?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama version response: {}", e)))?;

        let version = response["version"].as_str()
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))?
            .to_string();

        Ok(version)
    }
}

#[async_trait]
impl GenerationProvider for Ollama {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerationRequest::new(model, prompt);
        let response = self.generate(request).await?;
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
