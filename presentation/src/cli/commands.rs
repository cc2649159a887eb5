//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for ollama-chat
#[derive(Parser, Debug)]
#[command(name = "ollama-chat")]
#[command(author, version, about = "Streaming chat with a local Ollama model")]
#[command(long_about = r#"
ollama-chat talks to a locally running Ollama server and streams the model's
reply into the terminal as it is generated. Press Ctrl+C while a reply is
streaming to stop it.

Without a PROMPT an interactive session starts. With a PROMPT a single turn is
sent, the reply is printed and the program exits (non-zero on failure).

Configuration files are loaded from (in priority order):
1. OLLAMA_CHAT_* environment variables (e.g. OLLAMA_CHAT_OLLAMA__MODEL)
2. --config <path>        Explicit config file
3. ./ollama-chat.toml     Project-level config
4. ~/.config/ollama-chat/config.toml   Global config

Example:
  ollama-chat
  ollama-chat -m llama3.2 "Explain ownership in Rust"
  ollama-chat --url http://gpu-box:11434
"#)]
pub struct Cli {
    /// Send a single prompt and exit instead of starting the REPL
    pub prompt: Option<String>,

    /// Model to chat with (overrides configuration)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the Ollama server (overrides configuration)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
