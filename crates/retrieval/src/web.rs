//! Web search capability.
//!
//! Live web retrieval via SerpAPI. Results are shaped into [`Passage`]s with
//! url/title locators so the session layer can cite them like any other
//! source.

use crate::types::Passage;
use corpusqa_core::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

/// Maximum number of web results a single search may request.
pub const MAX_WEB_RESULTS: usize = 10;

/// Transport timeout for the search request.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait for live web passage retrieval.
#[async_trait::async_trait]
pub trait WebSearch: Send + Sync {
    /// Search the web and return up to `num_results` passages.
    ///
    /// `num_results` must be in `1..=10`.
    ///
    /// # Errors
    /// Returns [`AppError::SearchFailure`] on transport, auth, or quota
    /// errors, and on invalid arguments.
    async fn search(&self, query: &str, num_results: usize) -> AppResult<Vec<Passage>>;
}

/// SerpAPI response format (the fields we consume).
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: Option<String>,
}

/// SerpAPI web search client.
pub struct SerpApiClient {
    api_key: String,
    engine: String,
    base_url: String,
    client: reqwest::Client,
}

impl SerpApiClient {
    /// Create a client with the given API key and the google engine.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine: "google".to_string(),
            base_url: "https://serpapi.com/search".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the search engine (default: "google").
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    fn validate(query: &str, num_results: usize) -> AppResult<()> {
        if query.trim().is_empty() {
            return Err(AppError::SearchFailure(
                "Query must be a non-empty string".to_string(),
            ));
        }
        if num_results < 1 || num_results > MAX_WEB_RESULTS {
            return Err(AppError::SearchFailure(format!(
                "num_results must be between 1 and {}",
                MAX_WEB_RESULTS
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl WebSearch for SerpApiClient {
    async fn search(&self, query: &str, num_results: usize) -> AppResult<Vec<Passage>> {
        Self::validate(query, num_results)?;

        tracing::debug!("Searching web for up to {} results", num_results);

        let num = num_results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .timeout(SEARCH_TIMEOUT)
            .query(&[
                ("engine", self.engine.as_str()),
                ("q", query),
                ("api_key", self.api_key.as_str()),
                ("num", num.as_str()),
                ("hl", "en"),
                ("gl", "us"),
            ])
            .send()
            .await
            .map_err(|e| AppError::SearchFailure(format!("Web search failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::SearchFailure(format!(
                "SerpAPI error ({}): {}",
                status, error_text
            )));
        }

        let serp_response: SerpApiResponse = response.json().await.map_err(|e| {
            AppError::SearchFailure(format!("Failed to parse search response: {}", e))
        })?;

        let passages: Vec<Passage> = serp_response
            .organic_results
            .into_iter()
            .take(num_results)
            .map(|result| {
                Passage::web(
                    result.snippet.unwrap_or_default(),
                    result.link,
                    result.title,
                )
            })
            .collect();

        if passages.is_empty() {
            tracing::warn!("No web results found for query");
        } else {
            tracing::info!("Retrieved {} web passages", passages.len());
        }

        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceLocator;

    #[test]
    fn test_num_results_bounds() {
        assert!(SerpApiClient::validate("q", 0).is_err());
        assert!(SerpApiClient::validate("q", 11).is_err());
        assert!(SerpApiClient::validate("q", 1).is_ok());
        assert!(SerpApiClient::validate("q", 10).is_ok());
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(SerpApiClient::validate("  ", 3).is_err());
    }

    #[test]
    fn test_organic_results_parsing() {
        let json = r#"{
            "organic_results": [
                {"title": "Dopamine", "link": "https://example.com/dopamine", "snippet": "A neurotransmitter."},
                {"title": "No snippet", "link": "https://example.com/other"}
            ]
        }"#;

        let parsed: SerpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.organic_results.len(), 2);

        let passages: Vec<Passage> = parsed
            .organic_results
            .into_iter()
            .map(|r| Passage::web(r.snippet.unwrap_or_default(), r.link, r.title))
            .collect();

        assert_eq!(passages[0].text, "A neurotransmitter.");
        assert_eq!(
            passages[0].locator,
            SourceLocator::Web {
                url: "https://example.com/dopamine".to_string(),
                title: "Dopamine".to_string(),
            }
        );
        assert!(!passages[1].has_usable_text());
    }
}
