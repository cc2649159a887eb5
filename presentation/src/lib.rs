//! Presentation layer for ollama-chat
//!
//! This crate contains the CLI definition, the console formatter, the
//! terminal view that observes the stream controller, and the interactive
//! chat REPL.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, TerminalView};
pub use cli::commands::Cli;
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
