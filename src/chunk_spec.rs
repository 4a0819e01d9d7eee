//! Chunking configuration.
//!
//! A sliding window is described by two numbers:
//!
//! - `chunk_size`: the most characters a chunk may hold
//! - `chunk_overlap`: how many trailing characters of one chunk reappear at the
//!   head of the next
//!
//! The window advances by `step = chunk_size - chunk_overlap`. If the overlap
//! reached the size the step would be zero and the window would never move,
//! so such configurations are rejected up front instead of at split time.
//!
//! ```text
//! chunk_size = 4, chunk_overlap = 1, step = 3
//!
//! "ABCDEFGHIJ"
//!  ABCD          [0..4]
//!     DEFG       [3..7]
//!        GHIJ    [6..10]
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Validated sliding-window configuration.
///
/// # Examples
///
/// ```rust
/// use ctxwindow::ChunkSpec;
///
/// let spec = ChunkSpec::new(4, 1).unwrap();
/// assert_eq!(spec.step(), 3);
/// assert_eq!(spec.expected_chunks(10), 3);
///
/// assert!(ChunkSpec::new(4, 4).is_err());
/// assert!(ChunkSpec::new(0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChunkSpec", into = "RawChunkSpec")]
pub struct ChunkSpec {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl ChunkSpec {
    /// Create a spec, rejecting a zero size or an overlap that is not below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `chunk_size == 0`,
    /// `chunk_overlap >= chunk_size`, or `chunk_size` does not fit in an `i64`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(0).into());
        }
        // Sizes must survive the signed wire form.
        if i64::try_from(chunk_size).is_err() {
            return Err(ConfigError::ChunkSizeTooLarge(chunk_size).into());
        }
        if chunk_overlap >= chunk_size {
            return Err(ConfigError::OverlapExceedsSize {
                size: chunk_size,
                overlap: chunk_overlap,
            }
            .into());
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Create a spec from signed values as they arrive over the wire.
    ///
    /// # Errors
    ///
    /// Negative or zero sizes and negative overlaps are rejected in addition
    /// to everything [`ChunkSpec::new`] rejects.
    pub fn from_signed(chunk_size: i64, chunk_overlap: i64) -> Result<Self> {
        if chunk_size <= 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size).into());
        }
        if chunk_overlap < 0 {
            return Err(ConfigError::NegativeOverlap(chunk_overlap).into());
        }
        let size = usize::try_from(chunk_size)
            .map_err(|_| Error::from(ConfigError::InvalidChunkSize(chunk_size)))?;
        let overlap = usize::try_from(chunk_overlap)
            .map_err(|_| Error::from(ConfigError::NegativeOverlap(chunk_overlap)))?;
        Self::new(size, overlap)
    }

    /// Create a spec with no overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `chunk_size == 0`.
    pub fn no_overlap(chunk_size: usize) -> Result<Self> {
        Self::new(chunk_size, 0)
    }

    /// Size chunks to fit a model window with room left for the prompt and
    /// the response.
    ///
    /// `chunk_size = (max_tokens - reserved_tokens) * chars_per_token`.
    ///
    /// ```rust
    /// use ctxwindow::ChunkSpec;
    ///
    /// // 4096-token window, 500 for the prompt, 500 for the answer, ~4 chars per token
    /// let spec = ChunkSpec::for_window(4096, 1000, 4, 200).unwrap();
    /// assert_eq!(spec.chunk_size(), 12_384);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the reservation leaves no
    /// room, the resulting size overflows, or the overlap does not fit in what
    /// is left.
    pub fn for_window(
        max_tokens: usize,
        reserved_tokens: usize,
        chars_per_token: usize,
        chunk_overlap: usize,
    ) -> Result<Self> {
        let available = max_tokens.saturating_sub(reserved_tokens);
        let chunk_size = available
            .checked_mul(chars_per_token)
            .ok_or(ConfigError::ChunkSizeTooLarge(usize::MAX))?;
        Self::new(chunk_size, chunk_overlap)
    }

    /// Maximum characters per chunk.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Characters shared by consecutive chunks.
    #[must_use]
    pub const fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Characters between the starts of consecutive chunks. Always > 0.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.chunk_size - self.chunk_overlap
    }

    /// Exact number of chunks a document of `char_len` characters produces.
    #[must_use]
    pub fn expected_chunks(&self, char_len: usize) -> usize {
        if char_len == 0 {
            0
        } else if char_len <= self.chunk_size {
            1
        } else {
            1 + (char_len - self.chunk_size).div_ceil(self.step())
        }
    }
}

impl Default for ChunkSpec {
    fn default() -> Self {
        // The demo frontend's initial slider values.
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl TryFrom<(usize, usize)> for ChunkSpec {
    type Error = Error;

    fn try_from((size, overlap): (usize, usize)) -> Result<Self> {
        Self::new(size, overlap)
    }
}

/// Unvalidated wire form of [`ChunkSpec`].
#[derive(Serialize, Deserialize)]
struct RawChunkSpec {
    chunk_size: i64,
    #[serde(default)]
    chunk_overlap: i64,
}

impl TryFrom<RawChunkSpec> for ChunkSpec {
    type Error = Error;

    fn try_from(raw: RawChunkSpec) -> Result<Self> {
        Self::from_signed(raw.chunk_size, raw.chunk_overlap)
    }
}

impl From<ChunkSpec> for RawChunkSpec {
    fn from(spec: ChunkSpec) -> Self {
        // `ChunkSpec::new` keeps both values within `i64`.
        Self {
            chunk_size: i64::try_from(spec.chunk_size).unwrap_or(i64::MAX),
            chunk_overlap: i64::try_from(spec.chunk_overlap).unwrap_or(i64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let spec = ChunkSpec::new(10, 3).unwrap();
        assert_eq!(spec.step(), 7);
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = ChunkSpec::new(0, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::InvalidChunkSize(0))
        ));
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let err = ChunkSpec::new(10, 10).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::OverlapExceedsSize {
                size: 10,
                overlap: 10
            })
        ));
    }

    #[test]
    fn test_signed_values() {
        assert!(ChunkSpec::from_signed(-5, 0).is_err());
        assert!(ChunkSpec::from_signed(5, -1).is_err());
        assert_eq!(
            ChunkSpec::from_signed(5, 1).unwrap(),
            ChunkSpec::new(5, 1).unwrap()
        );
    }

    #[test]
    fn test_expected_chunks() {
        let spec = ChunkSpec::new(4, 1).unwrap();
        assert_eq!(spec.expected_chunks(0), 0);
        assert_eq!(spec.expected_chunks(2), 1);
        assert_eq!(spec.expected_chunks(4), 1);
        assert_eq!(spec.expected_chunks(5), 2);
        assert_eq!(spec.expected_chunks(10), 3);
    }

    #[test]
    fn test_for_window() {
        let spec = ChunkSpec::for_window(8192, 192, 4, 100).unwrap();
        assert_eq!(spec.chunk_size(), 32_000);
        assert!(ChunkSpec::for_window(100, 100, 4, 0).is_err());
        assert!(ChunkSpec::for_window(100, 90, 1, 10).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let spec: ChunkSpec = toml::from_str("chunk_size = 8\nchunk_overlap = 2").unwrap();
        assert_eq!(spec.step(), 6);
        assert!(toml::from_str::<ChunkSpec>("chunk_size = 8\nchunk_overlap = 8").is_err());
    }

    #[test]
    fn test_oversized_chunk_rejected() {
        let err = ChunkSpec::new(usize::MAX, 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfiguration(ConfigError::ChunkSizeTooLarge(usize::MAX))
        ));
        assert!(ChunkSpec::for_window(usize::MAX, 0, 4, 0).is_err());
        assert!(ChunkSpec::for_window(usize::MAX, 0, 1, 0).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let largest = usize::try_from(i64::MAX).unwrap();
        for spec in [
            ChunkSpec::new(4, 1).unwrap(),
            ChunkSpec::default(),
            ChunkSpec::new(largest, largest - 1).unwrap(),
        ] {
            let text = toml::to_string(&spec).unwrap();
            let back: ChunkSpec = toml::from_str(&text).unwrap();
            assert_eq!(back, spec);

            let json = serde_json::to_string(&spec).unwrap();
            assert_eq!(serde_json::from_str::<ChunkSpec>(&json).unwrap(), spec);
        }
    }

    #[test]
    fn test_tuple_conversion() {
        let spec = ChunkSpec::try_from((8, 2)).unwrap();
        assert_eq!(spec.chunk_size(), 8);
        assert_eq!(spec.chunk_overlap(), 2);
    }
}
