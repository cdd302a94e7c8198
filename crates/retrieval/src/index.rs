//! Document index capability.
//!
//! The corpus itself (PDF parsing, chunking, embeddings, vector search) lives
//! behind this trait; CorpusQA only consumes ranked passages. The bundled
//! implementation talks to a retrieval sidecar over HTTP.

use crate::types::Passage;
use corpusqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Trait for semantic passage retrieval over the private corpus.
///
/// Implementations are side-effect-free reads: the same query against an
/// unchanged index returns the same passages in the same order.
#[async_trait::async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Retrieve the `top_k` most relevant passages for a query.
    ///
    /// # Errors
    /// Returns [`AppError::IndexUnavailable`] when no index is loaded or the
    /// index cannot be reached.
    async fn retrieve(&self, query: &str, top_k: usize) -> AppResult<Vec<Passage>>;
}

/// Sidecar retrieval request format.
#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    query: &'a str,
    top_k: usize,
}

/// Sidecar retrieval response format.
#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    passages: Vec<IndexPassage>,
}

#[derive(Debug, Deserialize)]
struct IndexPassage {
    text: String,
    filename: String,
    page: u32,
}

/// HTTP client for a document retrieval sidecar.
///
/// Expects `POST {base}/retrieve` with `{query, top_k}` to return
/// `{passages: [{text, filename, page}]}` in relevance order.
pub struct HttpDocumentIndex {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentIndex {
    /// Create a client for the sidecar at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl DocumentIndex for HttpDocumentIndex {
    async fn retrieve(&self, query: &str, top_k: usize) -> AppResult<Vec<Passage>> {
        if query.trim().is_empty() {
            return Err(AppError::IndexUnavailable(
                "Query must be a non-empty string".to_string(),
            ));
        }

        tracing::debug!("Retrieving top {} passages for query", top_k);

        let url = format!("{}/retrieve", self.base_url);
        let request = RetrieveRequest { query, top_k };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::IndexUnavailable(format!("Failed to reach document index: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::IndexUnavailable(format!(
                "Document index error ({}): {}",
                status, error_text
            )));
        }

        let retrieve_response: RetrieveResponse = response.json().await.map_err(|e| {
            AppError::IndexUnavailable(format!("Failed to parse index response: {}", e))
        })?;

        let passages: Vec<Passage> = retrieve_response
            .passages
            .into_iter()
            .map(|p| Passage::pdf(p.text, p.filename, p.page))
            .collect();

        tracing::info!("Retrieved {} passages from document index", passages.len());

        Ok(passages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let index = HttpDocumentIndex::new("http://localhost:7820");
        let result = index.retrieve("   ", 4).await;
        assert!(matches!(result, Err(AppError::IndexUnavailable(_))));
    }

    #[test]
    fn test_sidecar_response_parsing() {
        let json = r#"{"passages": [{"text": "Dopamine increases motivation.", "filename": "a.pdf", "page": 2}]}"#;
        let parsed: RetrieveResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.passages.len(), 1);
        assert_eq!(parsed.passages[0].filename, "a.pdf");
        assert_eq!(parsed.passages[0].page, 2);
    }
}
