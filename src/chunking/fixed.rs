//! Fixed-size chunking strategy.
//!
//! Splits text into windows of at most `chunk_size` characters, each
//! starting `chunk_size - overlap` characters after the previous one.
//! Boundaries are placed on character positions, never inside a multi-byte
//! UTF-8 sequence, and may fall mid-word.

use crate::chunking::traits::{Chunker, validate_sizes};
use crate::chunking::{DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP, MAX_CHUNK_SIZE};
use crate::core::Chunk;
use crate::error::Result;
use crate::io::unicode::char_byte_offset;

/// Fixed-size chunker with character overlap.
///
/// Consecutive chunks share exactly `overlap` characters. Every chunk but
/// the last holds exactly `chunk_size` characters; the last holds whatever
/// remains (always more than `overlap`). Dropping the first `overlap`
/// characters of every chunk after the first and concatenating yields the
/// original text.
///
/// # Examples
///
/// ```
/// use refine_rs::chunking::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::with_size_and_overlap(10, 3);
/// let chunks = chunker.chunk(0, "0123456789ABCDEFGHIJ").unwrap();
/// assert_eq!(chunks[0].content, "0123456789");
/// assert_eq!(chunks[1].content, "789ABCDEFG");
/// assert_eq!(chunks[2].content, "EFGHIJ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChunker {
    /// Maximum chunk size in characters.
    chunk_size: usize,
    /// Characters shared between consecutive chunks.
    overlap: usize,
}

impl Default for FixedChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedChunker {
    /// Creates a chunker with the default size (1000) and overlap (200).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }

    /// Creates a chunker with a custom size and no overlap.
    #[must_use]
    pub const fn with_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            overlap: 0,
        }
    }

    /// Creates a chunker with a custom size and overlap.
    #[must_use]
    pub const fn with_size_and_overlap(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Returns the maximum chunk size in characters.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the overlap in characters.
    #[must_use]
    pub const fn overlap(&self) -> usize {
        self.overlap
    }
}

impl Chunker for FixedChunker {
    fn chunk(&self, document_id: usize, text: &str) -> Result<Vec<Chunk>> {
        validate_sizes(self.chunk_size, self.overlap, MAX_CHUNK_SIZE)?;

        if text.is_empty() {
            return Ok(vec![]);
        }

        let char_len = text.chars().count();
        if char_len <= self.chunk_size {
            return Ok(vec![Chunk::with_strategy(
                document_id,
                text.to_string(),
                0..char_len,
                0,
                self.name(),
            )]);
        }

        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::with_capacity(char_len.div_ceil(step));
        let mut start = 0;
        let mut start_byte = 0;

        loop {
            let rest = &text[start_byte..];
            let end = (start + self.chunk_size).min(char_len);
            let end_byte = start_byte + char_byte_offset(rest, end - start);

            let mut chunk = Chunk::with_strategy(
                document_id,
                text[start_byte..end_byte].to_string(),
                start..end,
                chunks.len(),
                self.name(),
            );
            if start > 0 {
                chunk.set_overlap(self.overlap);
            }
            chunks.push(chunk);

            if end == char_len {
                break;
            }
            start += step;
            start_byte += char_byte_offset(rest, step);
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }

    fn description(&self) -> &'static str {
        "Fixed-size character chunking with overlap between consecutive chunks"
    }
}
