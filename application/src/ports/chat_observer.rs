//! Chat observer port.
//!
//! [`ChatObserver`] is an **output port** that the presentation layer
//! implements to render the conversation and the live stream. All callback
//! argument types come from the domain layer.

use chat_domain::{ChatFailure, Notice, Turn};

/// Observer of controller state changes.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
///
/// Callbacks run while the controller holds its state lock, which keeps
/// them strictly ordered with `cancel()`: nothing is published for a stream
/// after its cancellation returns. Implementations must not call back into
/// the controller.
pub trait ChatObserver: Send + Sync {
    /// Called when a finalized turn is appended to the conversation
    fn on_turn_appended(&self, _turn: &Turn) {}

    /// Called when a request has been issued and streaming begins
    fn on_stream_start(&self) {}

    /// Called for each content delta with the updated partial text
    fn on_partial(&self, _partial: &str, _delta: &str) {}

    /// Called when the live stream stops, for any reason
    fn on_stream_end(&self) {}

    /// Called when a failure becomes the standing error
    fn on_error(&self, _failure: &ChatFailure) {}

    /// Called for transient notices such as a user cancellation
    fn on_notice(&self, _notice: Notice) {}

    /// Called after the conversation has been reset
    fn on_reset(&self) {}
}

/// No-op implementation for tests and headless use.
pub struct NoChatObserver;

impl ChatObserver for NoChatObserver {}
