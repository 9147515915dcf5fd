//! Chunk representation.
//!
//! Chunks are bounded-size segments of a document's text. Each chunk keeps
//! its character position within the source document so that consecutive
//! chunks can be stitched back together by dropping the shared overlap.

use crate::io::unicode::truncate_graphemes;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous segment of a source document.
///
/// Offsets are measured in Unicode scalar values (`char`s), not bytes, so
/// a chunk of size `S` holds at most `S` characters regardless of encoding.
///
/// # Examples
///
/// ```
/// use refine_rs::core::Chunk;
///
/// let chunk = Chunk::new(0, "Hello, world!".to_string(), 0..13, 0);
/// assert_eq!(chunk.len(), 13);
/// assert_eq!(chunk.start(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position of the source document in upload order.
    pub document_id: usize,

    /// Chunk text.
    pub content: String,

    /// Character range in the source document.
    pub char_range: Range<usize>,

    /// Sequential index within the document (0-based).
    pub index: usize,

    /// Chunk metadata.
    pub metadata: ChunkMetadata,
}

/// Metadata associated with a chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Chunking strategy that created this chunk.
    pub strategy: Option<String>,

    /// Number of leading characters shared with the previous chunk.
    pub overlap: usize,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// # Arguments
    ///
    /// * `document_id` - Position of the source document.
    /// * `content` - Chunk text.
    /// * `char_range` - Character range in the source document.
    /// * `index` - Sequential index within the document.
    #[must_use]
    pub fn new(document_id: usize, content: String, char_range: Range<usize>, index: usize) -> Self {
        Self {
            document_id,
            content,
            char_range,
            index,
            metadata: ChunkMetadata::default(),
        }
    }

    /// Creates a chunk tagged with the strategy that produced it.
    #[must_use]
    pub fn with_strategy(
        document_id: usize,
        content: String,
        char_range: Range<usize>,
        index: usize,
        strategy: &str,
    ) -> Self {
        let mut chunk = Self::new(document_id, content, char_range, index);
        chunk.metadata.strategy = Some(strategy.to_string());
        chunk
    }

    /// Returns the chunk length in characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.char_range.end - self.char_range.start
    }

    /// Returns the chunk size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.content.len()
    }

    /// Checks if the chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the start character offset in the source document.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.char_range.start
    }

    /// Returns the end character offset in the source document.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.char_range.end
    }

    /// Records how many leading characters are shared with the previous chunk.
    pub const fn set_overlap(&mut self, overlap: usize) {
        self.metadata.overlap = overlap;
    }

    /// Returns the text that is not shared with the previous chunk.
    #[must_use]
    pub fn fresh_content(&self) -> &str {
        self.content
            .char_indices()
            .nth(self.metadata.overlap)
            .map_or("", |(byte, _)| &self.content[byte..])
    }

    /// Returns a preview of the chunk content (first N grapheme clusters).
    #[must_use]
    pub fn preview(&self, max_graphemes: usize) -> &str {
        truncate_graphemes(&self.content, max_graphemes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_new() {
        let chunk = Chunk::new(1, "Hello".to_string(), 0..5, 0);
        assert_eq!(chunk.document_id, 1);
        assert_eq!(chunk.content, "Hello");
        assert_eq!(chunk.char_range, 0..5);
        assert_eq!(chunk.index, 0);
        assert_eq!(chunk.metadata.overlap, 0);
        assert!(chunk.metadata.strategy.is_none());
    }

    #[test]
    fn test_chunk_with_strategy() {
        let chunk = Chunk::with_strategy(0, "content".to_string(), 0..7, 0, "fixed");
        assert_eq!(chunk.metadata.strategy, Some("fixed".to_string()));
    }

    #[test]
    fn test_chunk_len_counts_chars() {
        let chunk = Chunk::new(0, "世界!".to_string(), 10..13, 2);
        assert_eq!(chunk.len(), 3);
        assert_eq!(chunk.byte_len(), 7);
        assert_eq!(chunk.start(), 10);
        assert_eq!(chunk.end(), 13);
    }

    #[test]
    fn test_fresh_content() {
        let mut chunk = Chunk::new(0, "abcdef".to_string(), 4..10, 1);
        assert_eq!(chunk.fresh_content(), "abcdef");

        chunk.set_overlap(2);
        assert_eq!(chunk.fresh_content(), "cdef");

        chunk.set_overlap(6);
        assert_eq!(chunk.fresh_content(), "");
    }

    #[test]
    fn test_fresh_content_multibyte() {
        let mut chunk = Chunk::new(0, "世界abc".to_string(), 0..5, 0);
        chunk.set_overlap(2);
        assert_eq!(chunk.fresh_content(), "abc");
    }

    #[test]
    fn test_chunk_preview() {
        let chunk = Chunk::new(0, "Hello, world!".to_string(), 0..13, 0);
        assert_eq!(chunk.preview(5), "Hello");
        assert_eq!(chunk.preview(100), "Hello, world!");
    }

    #[test]
    fn test_chunk_empty() {
        let chunk = Chunk::new(0, String::new(), 0..0, 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.len(), 0);
    }

    #[test]
    fn test_chunk_serialization() {
        let chunk = Chunk::with_strategy(0, "test".to_string(), 0..4, 0, "fixed");
        let json = serde_json::to_string(&chunk).unwrap();
        let back: Chunk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chunk);
    }
}
