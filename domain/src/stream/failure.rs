//! User-facing failure classification and notices

use crate::Model;

const UNEXPECTED: &str = "An unexpected error occurred";

/// A failed chat attempt, classified for display.
///
/// Cancellation is deliberately absent: a user stopping the stream is a
/// [`Notice`], never a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFailure {
    /// The server could not be reached at all.
    ConnectionRefused { endpoint: String },
    /// The server answered 404 for the chat endpoint, i.e. the model is not pulled.
    ModelMissing { model: Model },
    /// Anything else, carrying the underlying message.
    Other(String),
}

impl ChatFailure {
    /// Human-readable message with remediation text where one exists
    pub fn message(&self) -> String {
        match self {
            ChatFailure::ConnectionRefused { endpoint } => format!(
                "Could not connect to Ollama. Please ensure Ollama is running on {}",
                endpoint
            ),
            ChatFailure::ModelMissing { model } => format!(
                "Model '{}' not found. Please ensure the model is pulled using: {}",
                model,
                model.pull_command()
            ),
            ChatFailure::Other(message) if message.trim().is_empty() => UNEXPECTED.to_string(),
            ChatFailure::Other(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ChatFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Transient informational notice, shown once and never stored as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Cancelled,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Cancelled => "Request cancelled",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notice::Cancelled => "The request was stopped by the user.",
        }
    }
}
