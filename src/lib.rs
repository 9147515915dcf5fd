//! # refine-rs
//!
//! Chat with your documents through a local Ollama model.
//!
//! Uploaded documents are cut into fixed-size, overlapping character
//! chunks. On every chat turn all chunks are concatenated into a single
//! system message, followed by the conversation so far and the new user
//! message, and sent to Ollama's `/api/chat` endpoint.
//!
//! ## Features
//!
//! - **Chunking**: Fixed-size character windows with configurable overlap
//! - **Prompt Assembly**: Whole-corpus context on every turn, history in order
//! - **Inference**: Non-streaming Ollama chat client behind a trait seam
//! - **Memory Mapping**: Efficient handling of large files
//! - **Unicode Aware**: Offsets count characters, previews respect graphemes

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod inference;
pub mod io;
pub mod prompt;
pub mod session;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, ChunkMetadata, Document, DocumentKind, Message, Role};

// Re-export chunking types
pub use chunking::{Chunker, FixedChunker};

// Re-export prompt assembly
pub use prompt::{assemble_prompt, build_context};

// Re-export inference types
pub use inference::{InferenceClient, OllamaClient};

// Re-export session types
pub use session::{ChunkStore, Session, SessionState};

// Re-export configuration and CLI types
pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
