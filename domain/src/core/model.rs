//! Model value object representing the Ollama model to chat with

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Model identifier (Value Object)
///
/// Ollama accepts any `name[:tag]` string, so the only invariant enforced
/// here is that the identifier is not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model(String);

impl Model {
    /// Model used when nothing else is configured
    pub const DEFAULT: &'static str = "qwen3:14b";

    /// Create a model, rejecting blank identifiers
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidModel(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shell command that pulls this model into the local server
    pub fn pull_command(&self) -> String {
        format!("ollama pull {}", self.0)
    }
}

impl Default for Model {
    /// Returns the default model (qwen3:14b)
    fn default() -> Self {
        Model(Self::DEFAULT.to_string())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = DomainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Model::new(s)
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
