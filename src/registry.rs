//! Model context-window registry.
//!
//! A registry is an ordered list of `{name, max_tokens}` pairs. Given a token
//! count it answers "which of these models could take this text in a single
//! request?". Order is preserved so callers can list models smallest first.

use serde::{Deserialize, Serialize};

/// A model and the size of its context window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLimit {
    /// Model identifier, e.g. `gpt-4`.
    pub name: String,
    /// Maximum tokens accepted in one request.
    pub max_tokens: usize,
}

impl ModelLimit {
    /// Create a model limit.
    #[must_use]
    pub fn new(name: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            name: name.into(),
            max_tokens,
        }
    }

    /// Whether `count` tokens fit in this model's window.
    #[must_use]
    pub fn accepts(&self, count: usize) -> bool {
        count <= self.max_tokens
    }
}

/// Ordered set of models with known context windows.
///
/// ```rust
/// use ctxwindow::ModelRegistry;
///
/// let registry = ModelRegistry::new([("gpt-3.5-turbo", 4096), ("claude-3", 200_000)]);
/// assert_eq!(registry.compatible(5000), ["claude-3"]);
/// assert_eq!(registry.compatible(100), ["gpt-3.5-turbo", "claude-3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRegistry {
    models: Vec<ModelLimit>,
}

impl ModelRegistry {
    /// Build a registry from `(name, max_tokens)` pairs, keeping their order.
    ///
    /// A repeated name replaces the earlier limit in place.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut registry = Self { models: Vec::new() };
        for (name, max_tokens) in models {
            registry.insert(ModelLimit::new(name, max_tokens));
        }
        registry
    }

    /// Add a model, replacing any existing entry with the same name.
    pub fn insert(&mut self, limit: ModelLimit) {
        match self.models.iter_mut().find(|m| m.name == limit.name) {
            Some(existing) => existing.max_tokens = limit.max_tokens,
            None => self.models.push(limit),
        }
    }

    /// Names of every model whose window holds `count` tokens, in registry order.
    #[must_use]
    pub fn compatible(&self, count: usize) -> Vec<String> {
        self.models
            .iter()
            .filter(|m| m.accepts(count))
            .map(|m| m.name.clone())
            .collect()
    }

    /// The context window of `name`, if registered.
    #[must_use]
    pub fn limit(&self, name: &str) -> Option<usize> {
        self.models
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.max_tokens)
    }

    /// Iterate over the registered models in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ModelLimit> {
        self.models.iter()
    }

    /// Number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether no models are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new([
            ("gpt-3.5-turbo", 4096),
            ("gpt-4", 8192),
            ("gpt-4-turbo", 128_000),
            ("claude-3-opus", 200_000),
        ])
    }
}

impl<'a> IntoIterator for &'a ModelRegistry {
    type Item = &'a ModelLimit;
    type IntoIter = std::slice::Iter<'a, ModelLimit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<ModelLimit>> for ModelRegistry {
    fn from(models: Vec<ModelLimit>) -> Self {
        let mut registry = Self { models: Vec::new() };
        for limit in models {
            registry.insert(limit);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatible_filters_by_limit() {
        let registry = ModelRegistry::new([("gpt-3.5-turbo", 4096), ("claude-3", 200_000)]);
        assert_eq!(registry.compatible(5000), ["claude-3"]);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let registry = ModelRegistry::new([("small", 10)]);
        assert_eq!(registry.compatible(10), ["small"]);
        assert!(registry.compatible(11).is_empty());
    }

    #[test]
    fn test_default_registry_order() {
        let registry = ModelRegistry::default();
        let names: Vec<_> = registry.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo", "claude-3-opus"]);
        assert_eq!(registry.compatible(9000), ["gpt-4-turbo", "claude-3-opus"]);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let registry = ModelRegistry::new([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.limit("a"), Some(3));
        assert_eq!(registry.iter().next().map(|m| m.name.as_str()), Some("a"));
    }
}
