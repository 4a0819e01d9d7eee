//! Exact token counting via `tiktoken-rs`.
//!
//! Loading a BPE table is far more expensive than encoding a request, so
//! encoders are built once per model name and shared afterwards.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tiktoken_rs::CoreBPE;

use crate::{Error, Result, TokenCounter};

/// Counts tokens with the model's own BPE encoding.
///
/// Model names tiktoken does not know (e.g. `claude-3-opus`) fail with
/// [`Error::Tokenizer`]; wrap this in a
/// [`FallbackCounter`](crate::FallbackCounter) to degrade to a heuristic.
#[derive(Default)]
pub struct TiktokenCounter {
    encoders: RwLock<HashMap<String, Arc<CoreBPE>>>,
}

impl TiktokenCounter {
    /// Create a counter with an empty encoder cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn encoder(&self, model: &str) -> Result<Arc<CoreBPE>> {
        if let Ok(cache) = self.encoders.read() {
            if let Some(bpe) = cache.get(model) {
                return Ok(Arc::clone(bpe));
            }
        }

        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| Error::Tokenizer {
            model: model.to_string(),
            message: e.to_string(),
        })?;
        let bpe = Arc::new(bpe);
        tracing::debug!(model, "loaded tiktoken encoding");

        // A poisoned cache only costs a reload next time.
        if let Ok(mut cache) = self.encoders.write() {
            cache.insert(model.to_string(), Arc::clone(&bpe));
        }
        Ok(bpe)
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        "tiktoken"
    }

    fn count(&self, text: &str, model: &str) -> Result<usize> {
        let bpe = self.encoder(model)?;
        Ok(bpe.encode_with_special_tokens(text).len())
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cached: Vec<String> = self
            .encoders
            .read()
            .map(|cache| cache.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("TiktokenCounter")
            .field("cached", &cached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_known_model() {
        let counter = TiktokenCounter::new();
        let count = counter.count("hello world", "gpt-3.5-turbo").unwrap();
        assert!(count > 0 && count <= "hello world".len());
    }

    #[test]
    fn test_empty_text_is_zero() {
        let counter = TiktokenCounter::new();
        assert_eq!(counter.count("", "gpt-4").unwrap(), 0);
    }

    #[test]
    fn test_unknown_model_is_error() {
        let counter = TiktokenCounter::new();
        let err = counter.count("hello", "not-a-real-model").unwrap_err();
        assert!(matches!(err, Error::Tokenizer { .. }));
    }

    #[test]
    fn test_encoder_is_cached() {
        let counter = TiktokenCounter::new();
        counter.count("a", "gpt-4").unwrap();
        counter.count("b", "gpt-4").unwrap();
        assert_eq!(counter.encoders.read().unwrap().len(), 1);
    }
}
