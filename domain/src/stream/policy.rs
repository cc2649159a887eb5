//! Policy for streams that end without a completion signal

use crate::DomainError;
use serde::{Deserialize, Serialize};

/// What happens to the accumulated text when the response body ends before
/// a `done` record arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnfinishedStreamPolicy {
    /// Drop the partial text silently.
    #[default]
    Discard,
    /// Keep non-empty partial text as a truncated assistant turn.
    Keep,
}

impl UnfinishedStreamPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnfinishedStreamPolicy::Discard => "discard",
            UnfinishedStreamPolicy::Keep => "keep",
        }
    }
}

impl std::fmt::Display for UnfinishedStreamPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnfinishedStreamPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discard" | "drop" => Ok(UnfinishedStreamPolicy::Discard),
            "keep" | "truncate" => Ok(UnfinishedStreamPolicy::Keep),
            _ => Err(DomainError::InvalidPolicy(s.to_string())),
        }
    }
}
