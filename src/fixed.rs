//! Fixed-size sliding-window chunking with overlap.
//!
//! Split every N characters, repeating M characters between neighbors.
//!
//! ## How It Works
//!
//! ```text
//! size = 10, overlap = 3, step = 7
//!
//! Document: "abcdefghijklmnopqrstuvwxyz"
//!
//! Chunk 0: "abcdefghij"   [0..10]
//! Chunk 1: "hijklmnopq"   [7..17]   <- starts at 0 + 7
//! Chunk 2: "opqrstuvwx"   [14..24]  <- starts at 7 + 7
//! Chunk 3: "vwxyz"        [21..26]  <- final chunk may be shorter
//! ```
//!
//! Production stops as soon as a chunk reaches the end of the document, so a
//! trailing window that would only repeat overlap is never emitted.
//!
//! ## Characters, Not Bytes
//!
//! Sizes count Unicode scalar values, the same unit a user sees in a text box
//! counter. A window therefore never lands inside a multibyte sequence and
//! every chunk can be sliced straight out of the source by its byte span.
//!
//! ## Why Overlap?
//!
//! Without overlap, information at chunk boundaries is lost:
//!
//! ```text
//! "The answer is 42"
//!         ↓
//! No overlap:   ["The answer i", "s 42"]        <- broken!
//! With overlap: ["The answer is", "answer is 42"] <- both have context
//! ```
//!
//! A common heuristic is 10-20% overlap (e.g. size=1000, overlap=100-200).

use std::iter;

use crate::{Chunk, ChunkSpec, Chunker, Result};

/// Fixed-size chunker with configurable overlap.
///
/// ## Example
///
/// ```rust
/// use ctxwindow::{Chunker, FixedChunker};
///
/// let chunker = FixedChunker::new(4, 1).unwrap();
/// let chunks = chunker.chunk("ABCDEFGHIJ");
///
/// let texts: Vec<_> = chunks.iter().map(|c| c.text.as_str()).collect();
/// assert_eq!(texts, ["ABCD", "DEFG", "GHIJ"]);
/// assert_eq!(chunks[1].char_start, 3);
/// ```
#[derive(Debug, Clone)]
pub struct FixedChunker {
    spec: ChunkSpec,
}

impl FixedChunker {
    /// Create a new fixed-size chunker.
    ///
    /// # Arguments
    ///
    /// * `size` - Maximum chunk size in characters
    /// * `overlap` - Characters to overlap between adjacent chunks
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if `size == 0` or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self> {
        Ok(Self::from_spec(ChunkSpec::new(size, overlap)?))
    }

    /// Create a chunker from an already validated spec.
    #[must_use]
    pub fn from_spec(spec: ChunkSpec) -> Self {
        Self { spec }
    }

    /// Create a chunker with no overlap.
    ///
    /// # Errors
    ///
    /// Returns an error if `size == 0`.
    pub fn no_overlap(size: usize) -> Result<Self> {
        Self::new(size, 0)
    }

    /// The configuration this chunker applies.
    #[must_use]
    pub fn spec(&self) -> ChunkSpec {
        self.spec
    }
}

impl Chunker for FixedChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return vec![];
        }

        // Byte offset of every char, plus the end of the text.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(iter::once(text.len()))
            .collect();
        let char_len = bounds.len() - 1;

        let size = self.spec.chunk_size();
        let step = self.spec.step();
        let mut chunks = Vec::with_capacity(self.estimate_chunks(char_len));
        let mut start = 0;

        loop {
            let end = (start + size).min(char_len);
            let (byte_start, byte_end) = (bounds[start], bounds[end]);
            chunks.push(Chunk::new(
                &text[byte_start..byte_end],
                byte_start..byte_end,
                start..end,
                chunks.len(),
            ));

            if end == char_len {
                break;
            }
            start += step;
        }

        tracing::debug!(
            chars = char_len,
            chunk_size = size,
            chunk_overlap = self.spec.chunk_overlap(),
            chunks = chunks.len(),
            "split document"
        );
        chunks
    }

    fn estimate_chunks(&self, char_len: usize) -> usize {
        self.spec.expected_chunks(char_len)
    }
}
