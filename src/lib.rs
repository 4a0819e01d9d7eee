//! # ctxwindow
//!
//! Tools for working inside a language model's context window.
//!
//! ## The Problem
//!
//! Language models accept a bounded number of tokens per request. A document
//! that exceeds the window fails or is silently truncated. Two questions come
//! up every time:
//!
//! - How many tokens is this, and which models can take it whole?
//! - If none can, how do I cut it into pieces that each fit?
//!
//! ## Chunking
//!
//! [`FixedChunker`] slides a window of `chunk_size` characters over the text,
//! advancing `chunk_size - chunk_overlap` characters each time:
//!
//! ```text
//! Document: "ABCDEFGHIJ"
//! Size: 4, Overlap: 1, Step: 3
//!
//! Chunk 0: "ABCD"  [0..4]
//! Chunk 1: "DEFG"  [3..7]   <- "D" repeated
//! Chunk 2: "GHIJ"  [6..10]  <- "G" repeated, reaches the end
//! ```
//!
//! An overlap at or above the size would never advance, so [`ChunkSpec`]
//! rejects it with [`Error::InvalidConfiguration`] before any text is touched.
//!
//! ## Token Estimation
//!
//! [`TokenEstimator`] pairs a [`TokenCounter`] with a [`ModelRegistry`]:
//!
//! | Counter | Accuracy | Cost |
//! |---------|----------|------|
//! | `TiktokenCounter` (feature `tiktoken`) | Exact for OpenAI models | BPE load per model |
//! | [`CharHeuristic`] | Rough, English prose | O(n) |
//! | [`WordHeuristic`] | Rough, English prose | O(n) |
//!
//! Which one runs is a configuration choice ([`EstimatorConfig`]), so callers
//! never change.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ctxwindow::{split, CharHeuristic, ChunkSpec, ModelRegistry, TokenEstimator};
//!
//! let text = "The quick brown fox jumps over the lazy dog.";
//!
//! let spec = ChunkSpec::new(20, 5).unwrap();
//! let chunks = split(text, &spec);
//! assert_eq!(chunks[0].text, "The quick brown fox ");
//!
//! let estimator = TokenEstimator::new(
//!     Arc::new(CharHeuristic::default()),
//!     ModelRegistry::default(),
//! );
//! let estimate = estimator.estimate(text, "gpt-4").unwrap();
//! assert!(estimate.fits("gpt-3.5-turbo"));
//! ```
//!
//! ## HTTP Boundary
//!
//! The [`api`] module holds the request/response types and pure handlers for
//! `/split`, `/tokenize`, `/process` and `/health`. Summarization goes through
//! the [`process::Summarizer`] trait; no network client ships with the crate.

mod chunk;
mod chunk_spec;
mod config;
mod error;
mod estimator;
mod fixed;
mod heuristic;
mod registry;

#[cfg(feature = "tiktoken")]
mod tiktoken;

pub mod api;
pub mod process;

pub use chunk::Chunk;
pub use chunk_spec::ChunkSpec;
pub use config::{CounterKind, EstimatorConfig};
pub use error::{ConfigError, Error, Result};
pub use estimator::{Estimate, TokenCounter, TokenEstimator};
pub use fixed::FixedChunker;
pub use heuristic::{CharHeuristic, FallbackCounter, WordHeuristic};
pub use registry::{ModelLimit, ModelRegistry};

#[cfg(feature = "tiktoken")]
pub use tiktoken::TiktokenCounter;

/// A text chunking strategy.
///
/// ```rust
/// use ctxwindow::{Chunk, Chunker, FixedChunker};
///
/// fn chunk_document(chunker: &dyn Chunker, text: &str) -> Vec<Chunk> {
///     chunker.chunk(text)
/// }
///
/// let fixed = FixedChunker::new(100, 20).unwrap();
/// let chunks = chunk_document(&fixed, "Hello world. This is a test.");
/// assert_eq!(chunks.len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each [`Chunk`] carries its text, ordinal, and offsets in the original
    /// document. Empty input yields no chunks.
    fn chunk(&self, text: &str) -> Vec<Chunk>;

    /// Estimate the number of chunks for a text of `char_len` characters.
    ///
    /// Useful for pre-allocation. May be approximate, but is zero for empty
    /// input.
    fn estimate_chunks(&self, char_len: usize) -> usize {
        if char_len == 0 {
            0
        } else {
            (char_len / 500).max(1)
        }
    }
}

/// Split `text` with a sliding window described by `spec`.
///
/// Shorthand for `FixedChunker::from_spec(*spec).chunk(text)`.
#[must_use]
pub fn split(text: &str, spec: &ChunkSpec) -> Vec<Chunk> {
    FixedChunker::from_spec(*spec).chunk(text)
}
