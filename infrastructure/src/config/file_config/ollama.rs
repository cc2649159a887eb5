//! Server configuration from TOML (`[ollama]` section)

use crate::ollama::gateway::OllamaChatGateway;
use chat_domain::Model;
use serde::{Deserialize, Serialize};

/// Raw Ollama server configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    /// Server address without the `/api/chat` path
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: OllamaChatGateway::DEFAULT_BASE_URL.to_string(),
            model: Model::DEFAULT.to_string(),
        }
    }
}
