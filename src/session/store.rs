//! Append-only chunk store.

use crate::core::Chunk;
use serde::Serialize;

/// Ordered collection of every chunk from every uploaded document.
///
/// Chunks are kept in upload order with no document boundary markers and
/// no deduplication: uploading the same file twice stores its chunks twice.
/// The store only grows; it lives as long as its session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
}

impl ChunkStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Appends chunks, preserving their order.
    pub fn extend(&mut self, chunks: impl IntoIterator<Item = Chunk>) {
        self.chunks.extend(chunks);
    }

    /// Returns the chunks as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Iterates over the chunks in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Returns the number of chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Checks if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Total characters across all chunks, overlap included.
    ///
    /// This is roughly what each chat turn sends as context.
    #[must_use]
    pub fn total_chars(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }
}

impl<'a> IntoIterator for &'a ChunkStore {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
