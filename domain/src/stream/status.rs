//! Controller status

/// Status of the stream controller.
///
/// There is no terminal state: `Idle` is both the initial state and the
/// state every stream returns to, whether it completed, was cancelled or
/// failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StreamStatus {
    #[default]
    Idle,
    Streaming,
}

impl StreamStatus {
    pub fn is_streaming(&self) -> bool {
        matches!(self, StreamStatus::Streaming)
    }
}
