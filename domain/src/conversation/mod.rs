//! Conversation domain.
//!
//! - [`turn::Turn`]: a single immutable message within the conversation
//! - [`entities::Conversation`]: the append-only message store

pub mod entities;
pub mod turn;
