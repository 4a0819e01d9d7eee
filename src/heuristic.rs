//! Tokenizer-free token counters.
//!
//! Two rules of thumb for English text with GPT-style BPE vocabularies:
//!
//! | Counter | Rule | Tends to |
//! |---------|------|----------|
//! | [`CharHeuristic`] | ceil(chars / 4) | undercount code and CJK |
//! | [`WordHeuristic`] | floor(words × 1.3) | undercount long identifiers |
//!
//! Neither looks at the model name. [`FallbackCounter`] chains an exact counter
//! with one of these so an unknown model still gets an answer.

use crate::{Result, TokenCounter};

/// Estimates tokens as characters divided by a fixed ratio, rounded up.
///
/// ```rust
/// use ctxwindow::{CharHeuristic, TokenCounter};
///
/// let counter = CharHeuristic::default();
/// assert_eq!(counter.count("", "any").unwrap(), 0);
/// assert_eq!(counter.count("abcde", "any").unwrap(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharHeuristic {
    chars_per_token: usize,
}

impl CharHeuristic {
    /// Characters per token when none is configured.
    pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

    /// Create a heuristic with a custom ratio. A ratio of zero is treated as one.
    #[must_use]
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }

    /// The configured ratio.
    #[must_use]
    pub fn chars_per_token(self) -> usize {
        self.chars_per_token
    }
}

impl Default for CharHeuristic {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CHARS_PER_TOKEN)
    }
}

impl TokenCounter for CharHeuristic {
    fn name(&self) -> &str {
        "chars"
    }

    fn count(&self, text: &str, _model: &str) -> Result<usize> {
        Ok(text.chars().count().div_ceil(self.chars_per_token))
    }
}

/// Estimates tokens as whitespace-separated words times 1.3, truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordHeuristic;

impl TokenCounter for WordHeuristic {
    fn name(&self) -> &str {
        "words"
    }

    fn count(&self, text: &str, _model: &str) -> Result<usize> {
        let words = text.split_whitespace().count();
        // words * 1.3 without going through floats
        Ok(words * 13 / 10)
    }
}

/// Uses `primary`, switching to `fallback` whenever `primary` fails.
///
/// ```rust
/// use ctxwindow::{CharHeuristic, FallbackCounter, TokenCounter, WordHeuristic};
///
/// let counter = FallbackCounter::new(WordHeuristic, CharHeuristic::default());
/// assert_eq!(counter.count("one two three four five six seven eight nine ten", "m").unwrap(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct FallbackCounter<P, F> {
    primary: P,
    fallback: F,
}

impl<P: TokenCounter, F: TokenCounter> FallbackCounter<P, F> {
    /// Chain two counters.
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: TokenCounter, F: TokenCounter> TokenCounter for FallbackCounter<P, F> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn count(&self, text: &str, model: &str) -> Result<usize> {
        match self.primary.count(text, model) {
            Ok(count) => Ok(count),
            Err(err) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    model,
                    error = %err,
                    "token counter failed, using fallback"
                );
                self.fallback.count(text, model)
            }
        }
    }
}
