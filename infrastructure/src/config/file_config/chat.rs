//! Conversation configuration from TOML (`[chat]` section)

use chat_domain::UnfinishedStreamPolicy;
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// `discard` or `keep`: fate of text from a stream that ended without `done`
    pub unfinished_stream: String,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            unfinished_stream: UnfinishedStreamPolicy::default().to_string(),
        }
    }
}
