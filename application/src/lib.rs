//! Application layer for ollama-chat
//!
//! This crate contains the stream controller use case, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatConfig;
pub use ports::{
    chat_gateway::{ChatGateway, ChatRequest, GatewayError, StreamHandle},
    chat_observer::{ChatObserver, NoChatObserver},
};
pub use use_cases::stream_controller::{
    ChatSnapshot, ControllerError, SendOutcome, StreamController,
};
