//! I/O utilities for refine-rs.
//!
//! Provides document reading with memory mapping support for large
//! uploads, along with Unicode display helpers.

pub mod reader;
pub mod unicode;

pub use reader::{FileReader, read_document};
pub use unicode::{char_byte_offset, grapheme_count, truncate_graphemes};
