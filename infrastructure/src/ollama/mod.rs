//! Ollama HTTP adapter.
//!
//! - [`protocol`]: request body and response record shapes of `/api/chat`
//! - [`decoder`]: newline-delimited record framing over a byte stream
//! - [`gateway`]: [`ChatGateway`](chat_application::ChatGateway) implementation

pub mod decoder;
pub mod error;
pub mod gateway;
pub mod protocol;
