//! Estimator configuration.
//!
//! Selects the token counter and the model registry without touching call
//! sites:
//!
//! ```toml
//! counter = "tiktoken"
//! fallback = "words"
//!
//! [[models]]
//! name = "gpt-3.5-turbo"
//! max_tokens = 4096
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    CharHeuristic, Error, FallbackCounter, ModelLimit, ModelRegistry, Result, TokenCounter,
    TokenEstimator, WordHeuristic,
};

/// Which counting strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterKind {
    /// Exact BPE counts (needs the `tiktoken` feature).
    Tiktoken,
    /// Characters divided by `chars_per_token`.
    #[default]
    Chars,
    /// Whitespace words times 1.3.
    Words,
}

/// Serializable estimator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Primary counter.
    #[serde(default)]
    pub counter: CounterKind,
    /// Counter used when the primary one fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<CounterKind>,
    /// Ratio for [`CounterKind::Chars`].
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,
    /// Models to check counts against. Empty means the built-in registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelLimit>,
}

fn default_chars_per_token() -> usize {
    CharHeuristic::DEFAULT_CHARS_PER_TOKEN
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            counter: CounterKind::default(),
            fallback: None,
            chars_per_token: default_chars_per_token(),
            models: Vec::new(),
        }
    }
}

impl EstimatorConfig {
    /// Parse settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] on malformed TOML or unknown counters.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The registry these settings describe.
    #[must_use]
    pub fn registry(&self) -> ModelRegistry {
        if self.models.is_empty() {
            ModelRegistry::default()
        } else {
            ModelRegistry::from(self.models.clone())
        }
    }

    fn build_counter(&self, kind: CounterKind) -> Result<Arc<dyn TokenCounter>> {
        match kind {
            CounterKind::Chars => Ok(Arc::new(CharHeuristic::new(self.chars_per_token))),
            CounterKind::Words => Ok(Arc::new(WordHeuristic)),
            #[cfg(feature = "tiktoken")]
            CounterKind::Tiktoken => Ok(Arc::new(crate::TiktokenCounter::new())),
            #[cfg(not(feature = "tiktoken"))]
            CounterKind::Tiktoken => Err(Error::TiktokenFeatureRequired),
        }
    }
}

impl TokenEstimator {
    /// Build an estimator from settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TiktokenFeatureRequired`] when tiktoken is requested
    /// without the feature and no fallback is configured.
    ///
    /// ```rust
    /// use ctxwindow::{EstimatorConfig, TokenEstimator};
    ///
    /// let config = EstimatorConfig::from_toml_str(r#"
    ///     counter = "words"
    ///
    ///     [[models]]
    ///     name = "tiny"
    ///     max_tokens = 2
    /// "#).unwrap();
    /// let estimator = TokenEstimator::from_config(&config).unwrap();
    /// assert_eq!(estimator.estimate("a b c", "tiny").unwrap().count, 3);
    /// ```
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        let registry = config.registry();
        let primary = config.build_counter(config.counter);

        let counter: Arc<dyn TokenCounter> = match (primary, config.fallback) {
            (Ok(primary), Some(kind)) => {
                Arc::new(FallbackCounter::new(primary, config.build_counter(kind)?))
            }
            (Ok(primary), None) => primary,
            (Err(Error::TiktokenFeatureRequired), Some(kind)) => {
                tracing::warn!(
                    fallback = ?kind,
                    "tiktoken feature disabled, using fallback counter"
                );
                config.build_counter(kind)?
            }
            (Err(err), _) => return Err(err),
        };

        Ok(Self::new(counter, registry))
    }
}
