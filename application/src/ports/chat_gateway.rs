//! Chat Gateway port
//!
//! Defines the interface for streaming chat completions from the local
//! model server.

use async_trait::async_trait;
use chat_domain::{Model, StreamEvent, Turn};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Errors that can occur before or while a response is streamed
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Ollama returned HTTP {status}: {detail}")]
    HttpStatus { status: u16, detail: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// One streaming chat request: the model plus the full history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: Model,
    pub messages: Vec<Turn>,
}

impl ChatRequest {
    pub fn new(model: Model, messages: Vec<Turn>) -> Self {
        Self { model, messages }
    }
}

/// Handle for receiving streaming events from an in-flight request.
///
/// The channel closing without [`StreamEvent::Completed`] means the response
/// body ended early.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Next decoded event, or `None` once the stream has ended
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }
}

/// Gateway for chat communication
///
/// This port defines how the application layer talks to the model server.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Base address of the server, used in connection-failure messages
    fn endpoint(&self) -> &str;

    /// Issue a streaming chat request.
    ///
    /// Resolves once response headers arrive; a non-2xx status is returned as
    /// an error here. Body records are then delivered through the returned
    /// [`StreamHandle`]. Implementations must stop reading the body and drop
    /// the connection once `cancel` fires.
    async fn stream_chat(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> Result<StreamHandle, GatewayError>;
}
