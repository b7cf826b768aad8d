//! Genflow HTTP Client
//!
//! A thin, type-safe HTTP client for the generation service API.
//!
//! The service is an opaque HTTP collaborator: jobs are submitted via the
//! `/t2i`, `/t2v` and `/i2v` endpoints, then polled via `/jobs/{id}` until
//! terminal, at which point `/jobs/{id}/result` yields the artifact payload.
//! Status and result payloads are schema-free (`serde_json::Value`); the
//! probing lives in `genflow-core`, the polling in `genflow-tracker`.
//!
//! # Example
//!
//! ```no_run
//! use genflow_client::GenerationClient;
//! use genflow_core::dto::submit::TextToImageRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GenerationClient::new("https://api.example.com", "secret-token");
//!
//!     let submitted = client.text_to_image(TextToImageRequest::new("a lighthouse")).await?;
//!     println!("Submitted job: {}", submitted.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
mod submit;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the generation service API
///
/// Every request carries the bearer credential supplied at construction.
/// Methods are organized into two groups:
/// - Submission (`text_to_image`, `text_to_video`, `image_to_video_*`)
/// - Job polling (`get_job`, `get_job_result`)
#[derive(Debug, Clone)]
pub struct GenerationClient {
    /// Base URL of the service (e.g., "https://api.example.com")
    base_url: String,
    /// Bearer token sent with every request
    api_token: String,
    /// HTTP client instance
    client: Client,
}

impl GenerationClient {
    /// Create a new generation client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service API
    /// * `api_token` - Bearer credential for all requests
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_client(base_url, api_token, Client::new())
    }

    /// Create a new generation client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            client,
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request with the bearer credential attached
    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
    }

    /// Build a POST request with the bearer credential attached
    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an `ApiError` carrying the status
    /// and response body text if the request failed, or deserializes the
    /// body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GenerationClient::new("https://api.example.com", "token");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = GenerationClient::new("https://api.example.com/", "token");
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = GenerationClient::with_client("https://api.example.com", "token", http_client);
        assert_eq!(client.base_url(), "https://api.example.com");
    }
}
