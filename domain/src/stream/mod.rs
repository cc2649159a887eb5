//! Streaming response domain.
//!
//! - [`event::StreamEvent`]: decoded piece of an in-flight response
//! - [`status::StreamStatus`]: idle / streaming state of the controller
//! - [`failure::ChatFailure`]: classified failure shown as a standing error
//! - [`policy::UnfinishedStreamPolicy`]: what to do with text from a stream
//!   that ended without a completion signal

pub mod event;
pub mod failure;
pub mod policy;
pub mod status;
