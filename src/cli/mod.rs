//! CLI layer for refine-rs.
//!
//! Provides the command-line interface using clap: one-shot commands for
//! chunking, prompt previews and single questions, plus an interactive
//! chat loop.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{execute, run_chat};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
