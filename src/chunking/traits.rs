//! Chunker trait definition.
//!
//! Defines the interface for chunking strategies so the session can be
//! driven by any segmentation approach.

use crate::core::Chunk;
use crate::error::{ChunkingError, Result};

/// Trait for chunking text into bounded segments.
///
/// Implementations must be deterministic: the same input always produces
/// the same chunks.
///
/// # Examples
///
/// ```
/// use refine_rs::chunking::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::with_size_and_overlap(100, 20);
/// let text = "Hello, world! ".repeat(20);
/// let chunks = chunker.chunk(0, &text).unwrap();
/// assert!(!chunks.is_empty());
/// ```
pub trait Chunker: Send + Sync {
    /// Chunks the input text into segments.
    ///
    /// # Arguments
    ///
    /// * `document_id` - Position of the source document in upload order.
    /// * `text` - The input text to chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunker's configuration is invalid.
    fn chunk(&self, document_id: usize, text: &str) -> Result<Vec<Chunk>>;

    /// Returns the name of the chunking strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the chunking strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }
}

/// Checks a size/overlap pair.
///
/// # Errors
///
/// Returns an error if `chunk_size` is zero, exceeds `max`, or is not
/// larger than `overlap`.
pub fn validate_sizes(chunk_size: usize, overlap: usize, max: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(ChunkingError::InvalidConfig {
            reason: "chunk_size must be > 0".to_string(),
        }
        .into());
    }
    if chunk_size > max {
        return Err(ChunkingError::ChunkTooLarge {
            size: chunk_size,
            max,
        }
        .into());
    }
    if overlap >= chunk_size {
        return Err(ChunkingError::OverlapTooLarge {
            overlap,
            size: chunk_size,
        }
        .into());
    }
    Ok(())
}
