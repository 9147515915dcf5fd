//! Core domain models for refine-rs.
//!
//! Documents, the chunks cut from them, and the chat messages exchanged
//! with the model. These are pure values with no I/O dependencies.

pub mod chunk;
pub mod document;
pub mod message;

pub use chunk::{Chunk, ChunkMetadata};
pub use document::{Document, DocumentKind};
pub use message::{Message, Role};
