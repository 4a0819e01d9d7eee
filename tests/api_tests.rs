//! Wire-format tests for the HTTP boundary handlers.

use std::sync::Arc;

use serde_json::json;

use ctxwindow::api::{
    self, ProcessRequest, SplitRequest, SplitResponse, TokenizeRequest, TokenizeResponse,
};
use ctxwindow::process::{Message, Summarizer, Summary, MISSING_KEY_SUMMARY};
use ctxwindow::{CharHeuristic, Error, ModelRegistry, TokenEstimator};

#[test]
fn split_round_trips_through_json() {
    let request: SplitRequest = serde_json::from_value(json!({
        "text": "ABCDEFGHIJ",
        "chunk_size": 4,
        "chunk_overlap": 1
    }))
    .unwrap();

    let response = api::split(&request).unwrap();
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({ "chunks": ["ABCD", "DEFG", "GHIJ"], "count": 3 })
    );
}

#[test]
fn split_rejects_negative_size() {
    let request: SplitRequest = serde_json::from_value(json!({
        "text": "abc",
        "chunk_size": -1,
        "chunk_overlap": 0
    }))
    .unwrap();

    let err = api::split(&request).unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration(_)));
    assert!(err.is_client_error());
}

#[test]
fn split_single_short_document() {
    let response = api::split(&SplitRequest {
        text: "AB".into(),
        chunk_size: 10,
        chunk_overlap: 0,
    })
    .unwrap();
    assert_eq!(
        response,
        SplitResponse {
            chunks: vec!["AB".into()],
            count: 1
        }
    );
}

#[test]
fn tokenize_defaults_model() {
    let request: TokenizeRequest = serde_json::from_value(json!({ "text": "abcdefgh" })).unwrap();
    assert_eq!(request.model, api::DEFAULT_MODEL);

    let estimator = TokenEstimator::new(
        Arc::new(CharHeuristic::default()),
        ModelRegistry::new([("gpt-3.5-turbo", 4096), ("tiny", 1)]),
    );
    let response = api::tokenize(&estimator, &request).unwrap();
    assert_eq!(
        response,
        TokenizeResponse {
            count: 2,
            compatible_models: vec!["gpt-3.5-turbo".into()],
        }
    );
}

struct Echo;

impl Summarizer for Echo {
    fn summarize(&self, messages: &[Message], api_key: &str) -> ctxwindow::Result<Summary> {
        Ok(Summary {
            text: format!("{} messages with {api_key}", messages.len()),
            tokens_used: 42,
        })
    }
}

#[test]
fn process_uses_request_key() {
    let request: ProcessRequest =
        serde_json::from_value(json!({ "text": "Summarize me.", "api_key": "sk-test" })).unwrap();

    let response = api::process_with_env(&Echo, &request, |_| None);
    assert_eq!(response.summary, "2 messages with sk-test");
    assert_eq!(response.tokens_used, 42);
}

#[test]
fn process_without_key_is_mocked() {
    let request: ProcessRequest = serde_json::from_value(json!({ "text": "Summarize me." })).unwrap();
    assert!(request.api_key.is_none());

    let response = api::process_with_env(&Echo, &request, |_| None);
    assert_eq!(response.summary, MISSING_KEY_SUMMARY);
    assert_eq!(response.tokens_used, 0);
}

#[test]
fn health_is_ok() {
    assert_eq!(serde_json::to_value(api::health()).unwrap(), json!({ "status": "ok" }));
}
