//! Token estimation against model context windows.
//!
//! ## The Problem
//!
//! Whether a document fits a model is measured in tokens, not characters, and
//! every model family tokenizes differently. Exact counts need the model's BPE
//! tables; cheap estimates need nothing. Callers should not care which one is
//! in use:
//!
//! ```text
//! text ──► TokenCounter ──► count ──► ModelRegistry ──► compatible models
//!          (tiktoken | chars/4 | words×1.3)
//! ```
//!
//! [`TokenCounter`] is the pluggable capability. [`TokenEstimator`] pairs a
//! counter with a [`ModelRegistry`] and is what request handlers hold.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ModelRegistry, Result};

/// A strategy for counting tokens.
///
/// Implementations must be deterministic for a given `(text, model)` pair.
///
/// ```rust
/// use ctxwindow::{CharHeuristic, TokenCounter};
///
/// fn fits(counter: &dyn TokenCounter, text: &str, window: usize) -> bool {
///     counter.count(text, "gpt-4").map_or(false, |n| n <= window)
/// }
///
/// assert!(fits(&CharHeuristic::default(), "short text", 10));
/// ```
pub trait TokenCounter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Count the tokens `text` would occupy when sent to `model`.
    ///
    /// Heuristic counters ignore `model`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tokenizer`](crate::Error::Tokenizer) when an exact
    /// counter has no encoding for `model`.
    fn count(&self, text: &str, model: &str) -> Result<usize>;
}

impl<T: TokenCounter + ?Sized> TokenCounter for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn count(&self, text: &str, model: &str) -> Result<usize> {
        (**self).count(text, model)
    }
}

/// A token count and the models that can accept it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Tokens in the text.
    pub count: usize,
    /// Registry models whose window holds `count` tokens, in registry order.
    pub compatible_models: Vec<String>,
}

impl Estimate {
    /// Whether `model` is among the compatible models.
    #[must_use]
    pub fn fits(&self, model: &str) -> bool {
        self.compatible_models.iter().any(|m| m == model)
    }
}

/// Counts tokens and checks them against a model registry.
///
/// ```rust
/// use std::sync::Arc;
/// use ctxwindow::{CharHeuristic, ModelRegistry, TokenEstimator};
///
/// let registry = ModelRegistry::new([("tiny", 2), ("large", 1000)]);
/// let estimator = TokenEstimator::new(Arc::new(CharHeuristic::default()), registry);
///
/// let estimate = estimator.estimate("twelve chars", "large").unwrap();
/// assert_eq!(estimate.count, 3);
/// assert_eq!(estimate.compatible_models, ["large"]);
/// ```
#[derive(Clone)]
pub struct TokenEstimator {
    counter: Arc<dyn TokenCounter>,
    registry: ModelRegistry,
}

impl TokenEstimator {
    /// Create an estimator from a counter and a registry.
    pub fn new(counter: Arc<dyn TokenCounter>, registry: ModelRegistry) -> Self {
        Self { counter, registry }
    }

    /// Count tokens in `text` for `model` and list the models that fit.
    ///
    /// # Errors
    ///
    /// Propagates the counter's error; nothing is retried.
    pub fn estimate(&self, text: &str, model: &str) -> Result<Estimate> {
        let count = self.counter.count(text, model)?;
        let compatible_models = self.registry.compatible(count);
        tracing::debug!(
            counter = self.counter.name(),
            model,
            count,
            compatible = compatible_models.len(),
            "estimated tokens"
        );
        Ok(Estimate {
            count,
            compatible_models,
        })
    }

    /// The counter in use.
    pub fn counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    /// The registry compatibility is checked against.
    #[must_use]
    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}

impl std::fmt::Debug for TokenEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEstimator")
            .field("counter", &self.counter.name())
            .field("registry", &self.registry)
            .finish()
    }
}
