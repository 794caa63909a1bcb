/*!
 * Error types for the echomark application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The segment split budget must be a positive token count
    #[error("Split budget must be positive, got {0}")]
    InvalidSplitBudget(u32),

    /// The generation service endpoint could not be parsed as a URL
    #[error("Invalid service endpoint '{url}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A required model identifier is empty
    #[error("No model configured for {0}")]
    MissingModel(String),
}

/// Errors that can occur when talking to the generation service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while loading a document from a source
#[derive(Error, Debug)]
pub enum SourceError {
    /// The requested document does not exist
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    /// The document exists but could not be read
    #[error("Failed to read document '{path}': {reason}")]
    Unreadable {
        /// Path of the unreadable document
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },
}

/// Errors that can occur while persisting output through a sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// The output could not be written to its destination
    #[error("Failed to write output to '{path}': {reason}")]
    WriteFailed {
        /// Destination path of the failed write
        path: PathBuf,
        /// Underlying I/O failure
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the generation provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the document source
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from the document sink
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
