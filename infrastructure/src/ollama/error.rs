//! Error types for the Ollama adapter

use chat_application::GatewayError;
use thiserror::Error;

/// Result type alias for Ollama operations
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur when talking to the Ollama server
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),
}

impl From<OllamaError> for GatewayError {
    fn from(error: OllamaError) -> Self {
        match error {
            OllamaError::Http(e) if e.is_connect() => {
                GatewayError::ConnectionRefused(e.to_string())
            }
            OllamaError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            other => GatewayError::Other(other.to_string()),
        }
    }
}
