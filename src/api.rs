//! Request and response types for the HTTP boundary.
//!
//! Every handler is a plain function of its request, so a web framework only
//! has to deserialize the body, call the handler, and map
//! [`Error::is_client_error`](crate::Error::is_client_error) to a status code.
//!
//! | Route | Request | Response |
//! |-------|---------|----------|
//! | `GET /api/health` | | [`HealthResponse`] |
//! | `POST /api/split` | [`SplitRequest`] | [`SplitResponse`] |
//! | `POST /api/tokenize` | [`TokenizeRequest`] | [`TokenizeResponse`] |
//! | `POST /api/process` | [`ProcessRequest`] | [`ProcessResponse`] |

use serde::{Deserialize, Serialize};

use crate::process::{summarize_text, Summarizer};
use crate::{ChunkSpec, Chunker, FixedChunker, Result, TokenEstimator};

/// Model assumed when a tokenize request names none.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Liveness probe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Answer a liveness probe.
#[must_use]
pub fn health() -> HealthResponse {
    HealthResponse {
        status: "ok".to_string(),
    }
}

/// Body of `POST /api/split`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    /// Document to split.
    pub text: String,
    /// Maximum characters per chunk. Signed so bad input reaches validation.
    pub chunk_size: i64,
    /// Characters shared by neighbouring chunks.
    pub chunk_overlap: i64,
}

/// Response of `POST /api/split`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResponse {
    /// Chunk texts in document order.
    pub chunks: Vec<String>,
    /// Number of chunks.
    pub count: usize,
}

/// Split a document.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
/// for a non-positive size, a negative overlap, or an overlap not below the
/// size.
///
/// ```rust
/// use ctxwindow::api::{split, SplitRequest};
///
/// let response = split(&SplitRequest {
///     text: "ABCDEFGHIJ".into(),
///     chunk_size: 4,
///     chunk_overlap: 1,
/// }).unwrap();
/// assert_eq!(response.chunks, ["ABCD", "DEFG", "GHIJ"]);
/// ```
pub fn split(request: &SplitRequest) -> Result<SplitResponse> {
    let spec = ChunkSpec::from_signed(request.chunk_size, request.chunk_overlap)?;
    let chunks: Vec<String> = FixedChunker::from_spec(spec)
        .chunk(&request.text)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect();
    Ok(SplitResponse {
        count: chunks.len(),
        chunks,
    })
}

/// Body of `POST /api/tokenize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeRequest {
    /// Text to count.
    pub text: String,
    /// Model whose tokenizer to use.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Response of `POST /api/tokenize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizeResponse {
    /// Tokens in the text.
    pub count: usize,
    /// Models whose context window holds the text.
    pub compatible_models: Vec<String>,
}

/// Count tokens and report compatible models.
///
/// # Errors
///
/// Propagates the estimator's counter failure.
pub fn tokenize(estimator: &TokenEstimator, request: &TokenizeRequest) -> Result<TokenizeResponse> {
    let estimate = estimator.estimate(&request.text, &request.model)?;
    Ok(TokenizeResponse {
        count: estimate.count,
        compatible_models: estimate.compatible_models,
    })
}

/// Body of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Text to summarize.
    pub text: String,
    /// Provider key; falls back to `OPENAI_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Summary, mock notice, or provider error text.
    pub summary: String,
    /// Tokens the provider billed, 0 when it was not called.
    pub tokens_used: usize,
}

/// Summarize text through `summarizer`, reading the key fallback from the
/// process environment.
pub fn process<S: Summarizer + ?Sized>(summarizer: &S, request: &ProcessRequest) -> ProcessResponse {
    process_with_env(summarizer, request, |name| std::env::var(name).ok())
}

/// [`process`] with an explicit environment lookup.
pub fn process_with_env<S, E>(summarizer: &S, request: &ProcessRequest, env: E) -> ProcessResponse
where
    S: Summarizer + ?Sized,
    E: Fn(&str) -> Option<String>,
{
    let summary = summarize_text(&request.text, request.api_key.as_deref(), summarizer, env);
    ProcessResponse {
        summary: summary.text,
        tokens_used: summary.tokens_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_split_rejects_overlap_at_size() {
        let err = split(&SplitRequest {
            text: "abc".into(),
            chunk_size: 2,
            chunk_overlap: 2,
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_split_empty_text() {
        let response = split(&SplitRequest {
            text: String::new(),
            chunk_size: 10,
            chunk_overlap: 0,
        })
        .unwrap();
        assert!(response.chunks.is_empty());
        assert_eq!(response.count, 0);
    }

    #[test]
    fn test_health() {
        assert_eq!(health().status, "ok");
    }
}
