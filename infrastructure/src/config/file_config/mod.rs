//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Values are kept as plain strings here and converted to domain types by
//! [`FileConfig::to_chat_config`], so one bad value produces a warning
//! instead of refusing to start.

mod chat;
mod ollama;
mod output;

pub use chat::FileChatConfig;
pub use ollama::FileOllamaConfig;
pub use output::FileOutputConfig;

use chat_application::ChatConfig;
use chat_domain::{Model, UnfinishedStreamPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("ollama.model cannot be empty")]
    EmptyModelName,

    #[error("ollama.base_url '{0}' must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("chat.unfinished_stream '{0}' is not one of: discard, keep")]
    InvalidUnfinishedStream(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Server and model selection
    pub ollama: FileOllamaConfig,
    /// Conversation behavior
    pub chat: FileChatConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.ollama.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }

        let url = self.ollama.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            issues.push(ConfigValidationError::InvalidBaseUrl(
                self.ollama.base_url.clone(),
            ));
        }

        if self
            .chat
            .unfinished_stream
            .parse::<UnfinishedStreamPolicy>()
            .is_err()
        {
            issues.push(ConfigValidationError::InvalidUnfinishedStream(
                self.chat.unfinished_stream.clone(),
            ));
        }

        issues
    }

    /// Build the controller configuration, falling back to defaults for
    /// values that fail [`validate`](Self::validate).
    pub fn to_chat_config(&self) -> ChatConfig {
        let model = Model::new(self.ollama.model.as_str()).unwrap_or_default();
        let policy = self.chat.unfinished_stream.parse().unwrap_or_default();
        ChatConfig::new(model).with_unfinished_stream(policy)
    }
}
