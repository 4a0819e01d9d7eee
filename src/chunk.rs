//! The Chunk type: a window of text with position metadata.

/// A chunk of text with its position in the original document.
///
/// ## Offsets
///
/// Chunks carry two spans. `start` and `end` are byte offsets, so the chunk
/// can always be recovered by slicing the source:
///
/// ```rust
/// use ctxwindow::Chunk;
///
/// let text = "Hello, world!";
/// let chunk = Chunk::new("world", 7..12, 7..12, 0);
///
/// assert_eq!(&text[chunk.span()], "world");
/// ```
///
/// `char_start` and `char_end` count Unicode scalar values. Chunk sizes and
/// overlaps are measured in these, so for non-ASCII text the two spans differ:
///
/// ```text
/// Original: "añbc"          (4 chars, 5 bytes)
/// Chunk 0:  "añ"   chars 0..2   bytes 0..3
/// Chunk 1:  "ñb"   chars 1..3   bytes 1..4   <- overlap of one char
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk text.
    pub text: String,
    /// Byte offset where this chunk starts in the original document.
    pub start: usize,
    /// Byte offset where this chunk ends (exclusive) in the original document.
    pub end: usize,
    /// Character offset where this chunk starts.
    pub char_start: usize,
    /// Character offset where this chunk ends (exclusive).
    pub char_end: usize,
    /// Zero-based ordinal of this chunk in the sequence.
    pub index: usize,
}

impl Chunk {
    /// Create a new chunk from its byte span and character span.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        bytes: std::ops::Range<usize>,
        chars: std::ops::Range<usize>,
        index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            start: bytes.start,
            end: bytes.end,
            char_start: chars.start,
            char_end: chars.end,
            index,
        }
    }

    /// The length of this chunk in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_end - self.char_start
    }

    /// The byte span of this chunk in the original document.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// The character span of this chunk in the original document.
    #[must_use]
    pub fn char_span(&self) -> std::ops::Range<usize> {
        self.char_start..self.char_end
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ index: {}, chars: {}..{}, len: {} }}",
            self.index,
            self.char_start,
            self.char_end,
            self.char_len()
        )
    }
}
