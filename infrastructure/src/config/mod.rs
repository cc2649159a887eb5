//! Configuration file loading for ollama-chat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OLLAMA_CHAT_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./ollama-chat.toml` or `./.ollama-chat.toml`
//! 4. Global: `<config_dir>/ollama-chat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileOllamaConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
