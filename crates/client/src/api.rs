//! REST API client for the review backend HTTP endpoints.
//!
//! Wraps the analysis service's two endpoints (review submission and
//! artifact retrieval) using [`reqwest`], and defines the
//! [`ReviewBackend`] trait the lifecycle controller drives them through.

use async_trait::async_trait;
use serde::Deserialize;

use revlens_core::types::Artifact;

use crate::config::BackendConfig;

/// HTTP client for a single review backend.
pub struct ReviewApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response returned by the backend `/submit` endpoint after
/// successfully queuing a review.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned identifier for the queued review.
    pub review_id: String,
}

/// Errors from the review REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ReviewApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The two backend operations the lifecycle controller needs.
///
/// [`ReviewApi`] is the production implementation; tests substitute
/// scripted in-process backends.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Submit a repository reference for analysis and return the
    /// server-assigned review id.
    async fn submit_review(&self, repo_url: &str) -> Result<SubmitResponse, ReviewApiError>;

    /// Fetch the artifact for a review. Any error (including 404 while
    /// the analysis is still running) means "not ready yet".
    async fn fetch_artifact(&self, review_id: &str) -> Result<Artifact, ReviewApiError>;
}

impl ReviewApi {
    /// Create a new API client for a review backend.
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across controllers).
    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ReviewApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ReviewApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ReviewApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ReviewApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ReviewBackend for ReviewApi {
    /// Sends a `POST /submit` request with the repository reference and
    /// the `x-api-key` credential header. The header is always present,
    /// even when the configured key is empty.
    async fn submit_review(&self, repo_url: &str) -> Result<SubmitResponse, ReviewApiError> {
        let body = serde_json::json!({
            "repo_url": repo_url,
        });

        let response = self
            .client
            .post(format!("{}/submit", self.base_url))
            .header("x-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Sends a `GET /artifacts/{review_id}` request. A 200 response body
    /// is the artifact JSON; any other status maps to an error.
    async fn fetch_artifact(&self, review_id: &str) -> Result<Artifact, ReviewApiError> {
        let response = self
            .client
            .get(format!("{}/artifacts/{}", self.base_url, review_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
