//! Text-generation service abstraction
//!
//! The pipeline talks to its generation service through [`LlmClient`]; the
//! production implementation is [`gemini::GeminiClient`]. A scriptable
//! [`MockLlmClient`] ships for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Sampling temperature used when none is configured
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub(crate) const MAX_PROMPT_LOG_CHARS: usize = 4_000;

/// LLM request payload
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
}

/// Generation parameters shared by both pipeline stages
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// LLM client trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }
}

/// LLM errors
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Truncate prompt text for debug logging
pub(crate) fn truncate_for_log(input: &str, max_chars: usize) -> String {
    let char_count = input.chars().count();
    if char_count <= max_chars {
        return input.to_string();
    }
    let mut preview: String = input.chars().take(max_chars).collect();
    preview.push_str(&format!("... [truncated, total_chars={char_count}]"));
    preview
}

/// Scriptable in-memory LLM client for tests.
///
/// Responses are served in order; every call is recorded, including calls
/// that fail. An exhausted script fails the call.
#[derive(Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    /// Mock that answers each call with the next canned text
    #[must_use]
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_script(responses.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Mock with an explicit success/failure script
    #[must_use]
    pub fn from_script(script: Vec<Result<String, LlmError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, in call order
    #[must_use]
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);
        self.script
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Response("mock script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_script_in_order() {
        let mock = MockLlmClient::with_responses(["first", "second"]);
        let request = LlmRequest {
            system: "sys".to_string(),
            user: "usr".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        };

        assert_eq!(mock.complete(request.clone()).await.unwrap(), "first");
        assert_eq!(mock.complete(request.clone()).await.unwrap(), "second");
        assert!(mock.complete(request).await.is_err());
        assert_eq!(mock.requests().len(), 3);
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 10), "short");
        let long = "x".repeat(20);
        let preview = truncate_for_log(&long, 10);
        assert!(preview.starts_with("xxxxxxxxxx"));
        assert!(preview.contains("total_chars=20"));
    }
}
