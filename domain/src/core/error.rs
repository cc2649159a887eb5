//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid unfinished stream policy: {0} (expected 'discard' or 'keep')")]
    InvalidPolicy(String),
}
