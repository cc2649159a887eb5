//! Interactive chat module
//!
//! Provides the line-editor REPL and the terminal view that renders the
//! live stream.

mod repl;
mod view;

pub use repl::ChatRepl;
pub use view::TerminalView;
