//! Streaming events for chat responses.
//!
//! [`StreamEvent`] bridges the transport-level record stream to the
//! application layer, enabling real-time display of model output as it's
//! generated.

/// An event in a streaming chat response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model (`message.content` of one record).
    Delta(String),
    /// The completion signal (`done: true`). Nothing follows it.
    Completed,
    /// The server reported a failure in the middle of the stream.
    Error(String),
}

impl StreamEvent {
    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
