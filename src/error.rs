//! Error types for ctxwindow.

/// Errors that can occur while chunking, estimating, or processing text.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The chunking configuration would never terminate or is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The exact tokenizer could not handle the requested model.
    #[error("tokenizer unavailable for model `{model}`: {message}")]
    Tokenizer {
        /// The model the caller asked for.
        model: String,
        /// What the tokenizer backend reported.
        message: String,
    },

    /// Exact token counting requires the `tiktoken` feature.
    #[error("exact token counting requires the 'tiktoken' feature")]
    TiktokenFeatureRequired,

    /// Estimator configuration could not be parsed.
    #[error("failed to parse estimator config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The external summarization provider failed.
    #[error("summarizer error: {0}")]
    Summarizer(String),
}

impl Error {
    /// Whether the error stems from caller input rather than a collaborator.
    ///
    /// HTTP layers map `true` to a rejected request (4xx). Everything else,
    /// including a malformed server-side estimator config, is a server or
    /// upstream failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }
}

/// A rejected [`ChunkSpec`](crate::ChunkSpec).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Chunk size must be > 0.
    #[error("chunk size {0} must be > 0")]
    InvalidChunkSize(i64),

    /// Overlap must be >= 0.
    #[error("chunk overlap {0} must be >= 0")]
    NegativeOverlap(i64),

    /// Chunk size must fit the signed wire representation.
    #[error("chunk size {0} exceeds the largest representable size")]
    ChunkSizeTooLarge(usize),

    /// Overlap must be strictly less than the chunk size.
    #[error("chunk overlap {overlap} must be < chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that reached or exceeded the size.
        overlap: usize,
    },
}

/// Result type for ctxwindow operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_chunk_config_is_client_error() {
        let invalid = Error::from(ConfigError::InvalidChunkSize(0));
        assert!(invalid.is_client_error());

        let parse = Error::from(toml::from_str::<toml::Table>("a = [").unwrap_err());
        assert!(!parse.is_client_error());
        assert!(!Error::TiktokenFeatureRequired.is_client_error());
        assert!(!Error::Summarizer("down".to_string()).is_client_error());
    }
}
