//! Chunking for uploaded documents.
//!
//! Documents are cut into bounded-size, overlapping character windows
//! before being handed to the model as context. No semantic boundaries
//! (sentences, paragraphs) are respected.

pub mod fixed;
pub mod traits;

pub use fixed::FixedChunker;
pub use traits::{Chunker, validate_sizes};

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap in characters (for context continuity).
pub const DEFAULT_OVERLAP: usize = 200;

/// Maximum allowed chunk size (250k chars, ~62k tokens).
pub const MAX_CHUNK_SIZE: usize = 250_000;

/// Creates the default chunker.
#[must_use]
pub const fn default_chunker() -> FixedChunker {
    FixedChunker::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunker() {
        let chunker = default_chunker();
        assert_eq!(chunker.name(), "fixed");
        assert_eq!(chunker.chunk_size(), 1000);
        assert_eq!(chunker.overlap(), 200);
    }

    #[test]
    fn test_default_sizes_are_valid() {
        assert!(validate_sizes(DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, MAX_CHUNK_SIZE).is_ok());
    }
}
