//! Chat controller configuration.

use chat_domain::{Model, UnfinishedStreamPolicy};

/// Static parameters of the [`StreamController`](crate::StreamController).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatConfig {
    /// Model identifier sent with every request.
    pub model: Model,
    /// Handling of text from a stream that ended without `done`.
    pub unfinished_stream: UnfinishedStreamPolicy,
}

impl ChatConfig {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            unfinished_stream: UnfinishedStreamPolicy::default(),
        }
    }

    pub fn with_unfinished_stream(mut self, policy: UnfinishedStreamPolicy) -> Self {
        self.unfinished_stream = policy;
        self
    }
}
