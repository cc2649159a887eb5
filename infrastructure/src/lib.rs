//! Infrastructure layer for ollama-chat
//!
//! This crate contains the adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileOllamaConfig,
    FileOutputConfig,
};
pub use ollama::{
    error::{OllamaError, Result},
    gateway::OllamaChatGateway,
};
