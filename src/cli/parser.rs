//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::inference::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// refine-rs: chat with your documents through a local Ollama model.
///
/// Uploaded files are cut into overlapping character chunks and every
/// chunk is sent to the model as context on each turn.
#[derive(Parser, Debug)]
#[command(name = "refine-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the Ollama server.
    #[arg(long, env = "REFINE_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Model to chat with.
    #[arg(short, long, env = "REFINE_MODEL", default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Chunk size in characters.
    #[arg(long, env = "REFINE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE, global = true)]
    pub chunk_size: usize,

    /// Overlap between consecutive chunks in characters.
    #[arg(long, env = "REFINE_CHUNK_OVERLAP", default_value_t = DEFAULT_OVERLAP, global = true)]
    pub overlap: usize,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract and chunk one document, then show the chunks.
    Chunk {
        /// Path to a .txt, .pdf, .doc or .docx file.
        file: PathBuf,
    },

    /// Show the exact request body a message would send (no network).
    Prompt {
        /// Documents to upload first, in order.
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// The user message.
        message: String,
    },

    /// Upload documents and ask a single question.
    Ask {
        /// Documents to upload first, in order.
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,

        /// The user message.
        message: String,
    },

    /// Start an interactive chat session on stdin/stdout.
    ///
    /// Each line is one turn. `/upload <path>...` adds documents,
    /// `/files` lists them, `/history` prints the transcript, `/quit` exits.
    Chat {
        /// Documents to upload before the first turn, in order.
        #[arg(short, long = "file")]
        files: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["refine-rs", "chunk", "notes.txt"]).unwrap();
        assert_eq!(cli.endpoint, "http://localhost:11434");
        assert_eq!(cli.model, "llama2");
        assert_eq!(cli.chunk_size, 1000);
        assert_eq!(cli.overlap, 200);
        assert_eq!(cli.format, "text");
        assert!(matches!(cli.command, Commands::Chunk { .. }));
    }

    #[test]
    fn test_repeated_files_keep_order() {
        let cli = Cli::try_parse_from([
            "refine-rs", "ask", "-f", "b.txt", "--file", "a.txt", "what is this?",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Ask { ref files, ref message }
                if files == &[PathBuf::from("b.txt"), PathBuf::from("a.txt")]
                    && message == "what is this?"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "refine-rs",
            "prompt",
            "hello",
            "--model",
            "mistral",
            "--chunk-size",
            "500",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.model, "mistral");
        assert_eq!(cli.chunk_size, 500);
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_chat_without_files() {
        let cli = Cli::try_parse_from(["refine-rs", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { ref files } if files.is_empty()));
    }
}
