//! Terminal rendering of the live conversation.
//!
//! [`TerminalView`] observes the [`StreamController`](chat_application::StreamController)
//! and writes each delta as it arrives, with a spinner until the first token
//! and a `▌` cursor trailing the provisional text.

use crate::config::ReplConfig;
use crate::output::console::{ConsoleFormatter, STREAM_CURSOR};
use chat_application::ChatObserver;
use chat_domain::{Notice, Role};
use colored::Colorize;
use crossterm::{
    cursor::MoveLeft,
    queue,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

const CONTINUATION: &str = "\n  ";

struct ViewState<W> {
    out: W,
    spinner: Option<ProgressBar>,
    /// Label printed and at least one delta written for the current stream
    streamed: bool,
    cursor_drawn: bool,
}

/// Streams the assistant's reply into a terminal
pub struct TerminalView<W: Write + Send = Stdout> {
    config: ReplConfig,
    state: Mutex<ViewState<W>>,
}

impl TerminalView<Stdout> {
    pub fn new(config: ReplConfig) -> Self {
        Self::with_writer(io::stdout(), config)
    }
}

impl<W: Write + Send> TerminalView<W> {
    pub fn with_writer(out: W, config: ReplConfig) -> Self {
        Self {
            config,
            state: Mutex::new(ViewState {
                out,
                spinner: None,
                streamed: false,
                cursor_drawn: false,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState<W>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Thinking...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn write_delta(&self, state: &mut ViewState<W>, delta: &str) -> io::Result<()> {
        if let Some(pb) = state.spinner.take() {
            pb.finish_and_clear();
        }

        if !state.streamed {
            write!(
                state.out,
                "{}{}",
                ConsoleFormatter::role_label(Role::Assistant),
                CONTINUATION
            )?;
            state.streamed = true;
        } else if state.cursor_drawn {
            queue!(state.out, MoveLeft(1), Clear(ClearType::UntilNewLine))?;
            state.cursor_drawn = false;
        }

        write!(state.out, "{}", delta.replace('\n', CONTINUATION))?;

        if self.config.live_cursor {
            write!(state.out, "{}", STREAM_CURSOR.green())?;
            state.cursor_drawn = true;
        }

        state.out.flush()
    }

    fn end_stream(state: &mut ViewState<W>) -> io::Result<()> {
        if let Some(pb) = state.spinner.take() {
            pb.finish_and_clear();
        }

        if state.cursor_drawn {
            queue!(state.out, MoveLeft(1), Clear(ClearType::UntilNewLine))?;
            state.cursor_drawn = false;
        }

        if state.streamed {
            writeln!(state.out)?;
            state.streamed = false;
        }

        state.out.flush()
    }

    fn write_line(&self, line: &str) {
        let mut state = self.state();
        if let Err(e) = writeln!(state.out, "{}", line).and_then(|_| state.out.flush()) {
            debug!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> ChatObserver for TerminalView<W> {
    fn on_stream_start(&self) {
        if self.config.show_progress {
            self.state().spinner = Some(Self::spinner());
        }
    }

    fn on_partial(&self, _partial: &str, delta: &str) {
        let mut state = self.state();
        if let Err(e) = self.write_delta(&mut state, delta) {
            debug!("Failed to write delta to terminal: {}", e);
        }
    }

    fn on_stream_end(&self) {
        let mut state = self.state();
        if let Err(e) = Self::end_stream(&mut state) {
            debug!("Failed to finish stream output: {}", e);
        }
    }

    fn on_notice(&self, notice: Notice) {
        self.write_line(&ConsoleFormatter::format_notice(notice));
    }

    fn on_reset(&self) {
        self.write_line(&"Started a new conversation.".dimmed().to_string());
    }
}
