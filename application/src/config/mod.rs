//! Application-level configuration.
//!
//! - [`ChatConfig`]: model selection and stream-ending policy for the controller

pub mod chat_config;

pub use chat_config::ChatConfig;
