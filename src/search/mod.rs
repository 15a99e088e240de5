//! Web-search service abstraction
//!
//! The forecast stage grounds its prompt in one search call made through
//! [`SearchClient`]. Production implementation: [`serper::SerperClient`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use thiserror::Error;

pub mod serper;

/// Web-search client trait.
///
/// Returns a formatted text block of ranked results, ready to embed in a
/// prompt as context.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}

#[async_trait]
impl<T: SearchClient + ?Sized> SearchClient for Arc<T> {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        (**self).search(query).await
    }
}

/// Search errors
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Scriptable in-memory search client for tests.
#[derive(Default)]
pub struct MockSearchClient {
    script: Mutex<VecDeque<Result<String, SearchError>>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchClient {
    /// Mock that answers each call with the next canned result block
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
    pub fn from_script(script: Vec<Result<String, SearchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every query received so far, in call order
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        self.queries
            .lock()
            .expect("mock lock poisoned")
            .push(query.to_string());
        self.script
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::Response("mock script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_queries() {
        let mock = MockSearchClient::with_responses(["results"]);
        assert_eq!(mock.search("Paris weather").await.unwrap(), "results");
        assert!(mock.search("second query").await.is_err());
        assert_eq!(
            mock.queries(),
            vec!["Paris weather".to_string(), "second query".to_string()]
        );
    }
}
