//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use chat_application::{ChatGateway, ControllerError, SendOutcome, StreamController};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use std::io;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the loop should do after a slash command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandFlow {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl<G: ChatGateway + 'static> {
    controller: Arc<StreamController<G>>,
}

impl<G: ChatGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<StreamController<G>>) -> Self {
        Self { controller }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> io::Result<()> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.controller.model().to_string()),
            DefaultPromptSegment::Empty,
        );

        println!();
        print!(
            "{}",
            ConsoleFormatter::format_welcome(self.controller.model(), self.controller.endpoint())
        );
        println!();

        loop {
            if let Some(failure) = self.controller.error() {
                println!("{}", ConsoleFormatter::format_error_banner(&failure));
            }

            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt))?;

            match signal {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    // Handle commands
                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandFlow::Exit {
                            break;
                        }
                        continue;
                    }

                    println!();
                    self.send(line).await;
                    println!();
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Send one prompt outside the REPL and report how it ended
    pub async fn run_once(&self, prompt: &str) -> Result<SendOutcome, ControllerError> {
        send_with_interrupt(&self.controller, prompt).await
    }

    /// Handle slash commands
    fn handle_command(&self, cmd: &str) -> CommandFlow {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandFlow::Exit;
            }
            "/help" | "/h" | "/?" => {
                println!();
                print!("{}", ConsoleFormatter::format_help());
                println!();
            }
            "/clear" => {
                self.controller.reset();
            }
            "/history" => {
                println!();
                println!(
                    "{}",
                    ConsoleFormatter::format_transcript(&self.controller.snapshot())
                );
                println!();
            }
            "/model" => {
                println!(
                    "{} {} {}",
                    "Model:".dimmed(),
                    self.controller.model(),
                    format!("({})", self.controller.endpoint()).dimmed()
                );
            }
            "/dismiss" => {
                self.controller.dismiss_error();
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        CommandFlow::Continue
    }

    async fn send(&self, text: &str) {
        match send_with_interrupt(&self.controller, text).await {
            Ok(outcome) => debug!("Send finished: {:?}", outcome),
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }
}

/// Run one send while Ctrl+C cancels the stream instead of killing the process.
///
/// The signal listener is installed on the first poll, together with the
/// send itself, so there is no window where Ctrl+C still has its default
/// effect.
async fn send_with_interrupt<G: ChatGateway + 'static>(
    controller: &StreamController<G>,
    text: &str,
) -> Result<SendOutcome, ControllerError> {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };
    send_until_interrupted(controller, text, ctrl_c).await
}

/// Drive `send_turn` to completion, cancelling the stream once `interrupt`
/// resolves.
async fn send_until_interrupted<G, F>(
    controller: &StreamController<G>,
    text: &str,
    interrupt: F,
) -> Result<SendOutcome, ControllerError>
where
    G: ChatGateway + 'static,
    F: Future<Output = ()>,
{
    let send = controller.send_turn(text);
    tokio::pin!(send);

    tokio::select! {
        result = &mut send => result,
        _ = interrupt => {
            if controller.cancel() {
                info!("Stream interrupted with Ctrl+C");
            }
            send.await
        }
    }
}
