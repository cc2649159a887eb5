//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: the model identifier sent with every chat request
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
