//! Summarizing text through an external LLM provider.
//!
//! Nothing here talks to a network. The provider sits behind [`Summarizer`];
//! this module only decides whether to call it and shapes what it returns.
//!
//! ```text
//! request key ─┐
//!              ├─► key? ──no──► mock summary (tokens_used = 0)
//! OPENAI_API_KEY┘      │
//!                     yes
//!                      ▼
//!              Summarizer::summarize ──err──► "Error calling provider: ..."
//!                      │
//!                      ▼
//!                  Summary
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Chunk, Result};

/// Environment variable consulted when a request carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Summary returned when no API key can be found.
pub const MISSING_KEY_SUMMARY: &str =
    "Mock Summary: No API Key found. Please add it to .env or the text input.";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes text concisely.";

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model.
    System,
    /// The end user's content.
    User,
}

/// One chat message sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message author.
    pub role: Role,
    /// Message body.
    pub content: String,
}

impl Message {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// What a provider produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// The summary text.
    pub text: String,
    /// Total tokens the provider billed for the call.
    pub tokens_used: usize,
}

/// An LLM provider able to summarize a conversation.
pub trait Summarizer: Send + Sync {
    /// Run `messages` through the provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Summarizer`](crate::Error::Summarizer) when the
    /// provider fails. Callers report it; nothing retries.
    fn summarize(&self, messages: &[Message], api_key: &str) -> Result<Summary>;
}

/// Prompt asking for a two-sentence summary of `text`.
#[must_use]
pub fn summary_messages(text: &str) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(format!(
            "Please provide a 2-sentence summary of the following text:\n\n{text}"
        )),
    ]
}

/// Pick the API key: the request's own, then the environment.
///
/// Blank keys count as missing. `env` is injected so callers (and tests) can
/// choose where variables come from; pass `|k| std::env::var(k).ok()` for
/// the process environment.
pub fn resolve_api_key<E>(request_key: Option<&str>, env: E) -> Option<String>
where
    E: Fn(&str) -> Option<String>,
{
    request_key
        .map(str::to_string)
        .filter(|k| !k.trim().is_empty())
        .or_else(|| env(API_KEY_ENV).filter(|k| !k.trim().is_empty()))
}

/// Summarize `text`, never failing: every outcome becomes a [`Summary`].
pub fn summarize_text<S, E>(text: &str, api_key: Option<&str>, summarizer: &S, env: E) -> Summary
where
    S: Summarizer + ?Sized,
    E: Fn(&str) -> Option<String>,
{
    let Some(key) = resolve_api_key(api_key, env) else {
        tracing::warn!("no API key available, returning mock summary");
        return Summary {
            text: MISSING_KEY_SUMMARY.to_string(),
            tokens_used: 0,
        };
    };

    match summarizer.summarize(&summary_messages(text), &key) {
        Ok(summary) => {
            tracing::debug!(tokens_used = summary.tokens_used, "summarized text");
            summary
        }
        Err(err) => {
            tracing::warn!(error = %err, "summarizer failed");
            Summary {
                text: format!("Error calling provider: {err}"),
                tokens_used: 0,
            }
        }
    }
}

/// Summarize every chunk in order and total the tokens billed.
///
/// The key is resolved once for the whole batch. Chunks the provider fails on
/// carry the error text and add nothing to the total; nothing is retried.
///
/// ```rust
/// use ctxwindow::process::{summarize_chunks, SimulatedSummarizer};
/// use ctxwindow::{split, ChunkSpec};
///
/// let chunks = split("One. Two. Three. Four.", &ChunkSpec::new(10, 0).unwrap());
/// let (summaries, total) =
///     summarize_chunks(&chunks, Some("key"), &SimulatedSummarizer::default(), |_| None);
///
/// assert_eq!(summaries.len(), chunks.len());
/// assert_eq!(total, summaries.iter().map(|s| s.tokens_used).sum::<usize>());
/// ```
pub fn summarize_chunks<S, E>(
    chunks: &[Chunk],
    api_key: Option<&str>,
    summarizer: &S,
    env: E,
) -> (Vec<Summary>, usize)
where
    S: Summarizer + ?Sized,
    E: Fn(&str) -> Option<String>,
{
    let key = resolve_api_key(api_key, &env);
    let summaries: Vec<Summary> = chunks
        .iter()
        .map(|chunk| summarize_text(&chunk.text, key.as_deref(), summarizer, |_| None))
        .collect();
    let total: usize = summaries.iter().map(|s| s.tokens_used).sum();

    tracing::debug!(
        chunks = chunks.len(),
        tokens_used = total,
        "summarized chunks"
    );
    (summaries, total)
}

/// Offline stand-in for a provider.
///
/// Returns the first sentence or two of the user's text after an optional
/// delay, which is enough for demos of the request flow.
#[derive(Debug, Clone, Default)]
pub struct SimulatedSummarizer {
    delay: Duration,
}

impl SimulatedSummarizer {
    /// Create a simulator that sleeps for `delay` per call.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Summarizer for SimulatedSummarizer {
    fn summarize(&self, messages: &[Message], _api_key: &str) -> Result<Summary> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let body = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let body = body.split_once("\n\n").map_or(body, |(_, rest)| rest);

        let text: String = body
            .split_inclusive(['.', '!', '?'])
            .take(2)
            .collect::<String>()
            .trim()
            .to_string();
        let tokens_used = messages
            .iter()
            .map(|m| m.content.split_whitespace().count())
            .sum::<usize>()
            + text.split_whitespace().count();

        Ok(Summary { text, tokens_used })
    }
}
