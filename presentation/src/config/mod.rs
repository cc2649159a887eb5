//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl OutputConfig {
    /// Apply the color setting process-wide
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show a spinner until the first token arrives
    pub show_progress: bool,
    /// Draw the `▌` cursor after the text while a reply is streaming
    pub live_cursor: bool,
}

impl ReplConfig {
    /// Plain output for pipes and redirected stdout
    pub fn plain() -> Self {
        Self {
            show_progress: false,
            live_cursor: false,
        }
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            live_cursor: true,
        }
    }
}
