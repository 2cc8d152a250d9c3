//! HTTP boundary to the remote scoring service.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{AnalysisResult, DetectionEvent};

/// Failure taxonomy at the service boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered, but not with the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("service returned {status}")]
    Status { status: reqwest::StatusCode },

    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// True for pre-flight rejections that never reached the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct UrlRequest<'a> {
    url: &'a str,
}

/// Client for the scoring service's HTTP surface: one log read and three
/// analyze endpoints.
#[derive(Clone)]
pub struct ScanClient {
    base_url: String,
    http: reqwest::Client,
}

impl ScanClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the full audit log collection.
    ///
    /// Any body that is not a JSON array of event-shaped rows is a `Decode`
    /// error; the caller decides whether to fall back.
    pub async fn fetch_logs(&self) -> Result<Vec<DetectionEvent>, ClientError> {
        let endpoint = format!("{}/logs", self.base_url);
        let response = self
            .http
            .get(&endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
            });
        }

        let events = response
            .json::<Vec<DetectionEvent>>()
            .await
            .map_err(ClientError::Decode)?;

        debug!(count = events.len(), "fetched audit log");
        Ok(events)
    }

    pub async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ClientError> {
        debug!(bytes = text.len(), "submitting text sample");
        self.post_json("/analyze/text", &TextRequest { text }).await
    }

    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, ClientError> {
        debug!(url, "submitting url sample");
        self.post_json("/analyze/url", &UrlRequest { url }).await
    }

    /// Upload an audio sample as a multipart form with a single `file` field.
    pub async fn analyze_voice(&self, path: &Path) -> Result<AnalysisResult, ClientError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::File {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());

        debug!(bytes = bytes.len(), file = %file_name, "submitting audio sample");

        let form = multipart::Form::new().part("file", multipart::Part::bytes(bytes).file_name(file_name));
        let endpoint = format!("{}/analyze/voice", self.base_url);
        let response = self
            .http
            .post(&endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(response).await
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<AnalysisResult, ClientError> {
        let endpoint = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&endpoint)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<AnalysisResult, ClientError> {
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
            });
        }

        response
            .json::<AnalysisResult>()
            .await
            .map_err(ClientError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ScanClient::new("http://127.0.0.1:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        // Port 9 (discard) is closed in any sane environment
        let client = ScanClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client.fetch_logs().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(!err.is_validation());
    }
}
