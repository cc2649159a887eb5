//! Domain layer for ollama-chat
//!
//! This crate contains the conversation entities and the value objects that
//! describe a streamed model response. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Turn**: one message in the conversation, tagged user or assistant
//! - **Conversation**: append-only ordered sequence of turns
//! - **StreamEvent**: one decoded piece of an in-flight response
//! - **ChatFailure**: classified failure surfaced to the user as a standing error

pub mod conversation;
pub mod core;
pub mod stream;

// Re-export commonly used types
pub use conversation::{
    entities::Conversation,
    turn::{Role, Turn},
};
pub use core::{error::DomainError, model::Model};
pub use stream::{
    event::StreamEvent,
    failure::{ChatFailure, Notice},
    policy::UnfinishedStreamPolicy,
    status::StreamStatus,
};
