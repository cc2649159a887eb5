//! Console output formatter for conversations

use chat_application::ChatSnapshot;
use chat_domain::{ChatFailure, Model, Notice, Role, Turn};
use colored::{ColoredString, Colorize};

/// Glyph drawn after the provisional reply while it is streaming
pub const STREAM_CURSOR: &str = "▌";

/// Formats conversation state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Speaker label for a turn
    pub fn role_label(role: Role) -> ColoredString {
        match role {
            Role::User => "You:".cyan().bold(),
            Role::Assistant => "Assistant:".green().bold(),
        }
    }

    /// Format a single finalized turn
    pub fn format_turn(turn: &Turn) -> String {
        format!(
            "{}\n{}",
            Self::role_label(turn.role()),
            Self::indent(turn.content(), "  ")
        )
    }

    /// Format the whole conversation, including the provisional reply while
    /// a stream is live
    pub fn format_transcript(snapshot: &ChatSnapshot) -> String {
        let mut blocks: Vec<String> = snapshot.turns.iter().map(Self::format_turn).collect();

        if snapshot.status.is_streaming() {
            blocks.push(format!(
                "{}\n{}{}",
                Self::role_label(Role::Assistant),
                Self::indent(&snapshot.partial, "  "),
                STREAM_CURSOR.green()
            ));
        }

        if blocks.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }

        blocks.join("\n\n")
    }

    /// Format the standing error as a banner
    pub fn format_error_banner(failure: &ChatFailure) -> String {
        format!(
            "{} {}\n{}",
            "Error:".red().bold(),
            failure.message().red(),
            "  (type /dismiss to hide)".dimmed()
        )
    }

    /// Format a transient notice
    pub fn format_notice(notice: Notice) -> String {
        format!("{} {}", notice.title().yellow(), notice.description().dimmed())
    }

    /// Format the REPL welcome header
    pub fn format_welcome(model: &Model, endpoint: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Ollama Chat ===".cyan().bold()));
        output.push_str(&format!("{} {}\n", "Model:".dimmed(), model));
        output.push_str(&format!("{} {}\n\n", "Server:".dimmed(), endpoint));
        output.push_str(&Self::format_help());

        output
    }

    /// Format the list of slash commands
    pub fn format_help() -> String {
        let mut output = String::new();
        output.push_str("Commands:\n");
        output.push_str("  /help, /h, /?     - Show this help\n");
        output.push_str("  /clear            - Start a new conversation\n");
        output.push_str("  /history          - Show the conversation so far\n");
        output.push_str("  /model            - Show the current model\n");
        output.push_str("  /dismiss          - Hide the current error\n");
        output.push_str("  /quit, /exit, /q  - Exit chat\n");
        output.push_str("\nPress Ctrl+C while a reply is streaming to stop it.\n");
        output
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
