//! Serper web-search client.
//!
//! One POST per query against `google.serper.dev`; organic results are
//! rendered into a numbered text block for prompt context. Same fail-fast
//! policy as the generation client: no retry, no request timeout.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SearchApiConfig;
use crate::search::{SearchClient, SearchError};

/// Serper search client
pub struct SerperClient {
    client: reqwest::Client,
    config: SearchApiConfig,
}

impl SerperClient {
    /// Create a new Serper client
    pub fn new(config: SearchApiConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SearchError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    organic: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// Render organic results as a numbered text block
fn format_results(results: &[OrganicResult]) -> String {
    if results.is_empty() {
        return "No results found".to_string();
    }

    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {}\n   {}\n   {}",
                i + 1,
                r.title.as_deref().unwrap_or("(no title)"),
                r.link.as_deref().unwrap_or(""),
                r.snippet.as_deref().unwrap_or(""),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl SearchClient for SerperClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let body = SerperRequest {
            q: query,
            num: self.config.max_results,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SearchError::Response(format!("HTTP {status}: {text}")));
        }

        let parsed: SerperResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Serialization(e.to_string()))?;

        Ok(format_results(&parsed.organic.unwrap_or_default()))
    }
}
