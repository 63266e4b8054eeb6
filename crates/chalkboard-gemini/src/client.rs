// SPDX-FileCopyrightText: 2026 Chalkboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini Generative Language API.
//!
//! Provides [`GeminiClient`] which handles request construction,
//! authentication and error classification. Requests are never retried.

use std::time::Duration;

use chalkboard_core::{ChalkboardError, ProviderFailure};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse, ModelInfo};

/// API version path segment.
const API_VERSION: &str = "v1beta";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    default_model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new Gemini API client.
    ///
    /// # Arguments
    /// * `api_key` - sent as `x-goog-api-key` on every request
    /// * `model` - default model identifier (e.g. "gemini-1.5-flash")
    /// * `base_url` - API origin without the version path
    /// * `timeout` - whole-request timeout
    pub fn new(
        api_key: &str,
        model: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ChalkboardError> {
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| ChalkboardError::Config(format!("invalid API key header value: {e}")))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ChalkboardError::Provider {
                kind: ProviderFailure::Transport,
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            default_model: model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the default model identifier.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/{API_VERSION}/models/{model}", self.base_url)
    }

    /// Calls `generateContent` and returns the decoded response body.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ChalkboardError> {
        let url = format!("{}:generateContent", self.model_url(model));
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ChalkboardError::Provider {
            kind: ProviderFailure::Malformed,
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Fetches model metadata. Does not consume tokens.
    pub async fn get_model(&self, model: &str) -> Result<ModelInfo, ChalkboardError> {
        let response = self
            .client
            .get(self.model_url(model))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ChalkboardError::Provider {
            kind: ProviderFailure::Malformed,
            message: format!("failed to parse model info: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

fn transport_error(e: reqwest::Error) -> ChalkboardError {
    let message = if e.is_timeout() {
        format!("request timed out: {e}")
    } else {
        format!("HTTP request failed: {e}")
    };
    ChalkboardError::Provider {
        kind: ProviderFailure::Transport,
        message,
        source: Some(Box::new(e)),
    }
}

fn status_error(status: StatusCode, body: &str) -> ChalkboardError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!(
            "Gemini API error ({} {}): {}",
            status.as_u16(),
            api_err.error.status,
            api_err.error.message
        ),
        Err(_) => format!("API returned {status}: {body}"),
    };
    ChalkboardError::provider(ProviderFailure::Status(status.as_u16()), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            "test-api-key",
            "gemini-1.5-flash".into(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn success_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[tokio::test]
    async fn generate_content_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("Hi there!")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("Hello"))
            .await
            .unwrap();

        assert_eq!(result.first_candidate_text().as_deref(), Some("Hi there!"));
    }

    #[tokio::test]
    async fn client_sends_key_header_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "contents": [{"parts": [{"text": "Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("Hello"))
            .await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body("ok")))
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/", server.uri()));
        let result = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await;
        assert!(result.is_ok(), "got: {result:?}");
    }

    #[tokio::test]
    async fn error_status_is_not_retried() {
        let server = MockServer::start().await;

        let error_body = serde_json::json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        });

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(503).set_body_json(&error_body))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();

        match &err {
            ChalkboardError::Provider { kind, message, .. } => {
                assert_eq!(*kind, ProviderFailure::Status(503));
                assert!(message.contains("UNAVAILABLE"), "got: {message}");
                assert!(message.contains("overloaded"), "got: {message}");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_reported_raw() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad gateway"), "got: {err}");
    }

    #[tokio::test]
    async fn malformed_success_body_is_classified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChalkboardError::Provider {
                kind: ProviderFailure::Malformed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let client = test_client(&uri);
        let err = client
            .generate_content("gemini-1.5-flash", &GenerateContentRequest::from_prompt("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ChalkboardError::Provider {
                kind: ProviderFailure::Transport,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn get_model_reads_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models/gemini-1.5-flash"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "models/gemini-1.5-flash",
                "displayName": "Gemini 1.5 Flash"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let info = client.get_model("gemini-1.5-flash").await.unwrap();
        assert_eq!(info.name, "models/gemini-1.5-flash");
        assert_eq!(info.display_name.as_deref(), Some("Gemini 1.5 Flash"));
    }

    #[test]
    fn invalid_key_header_is_a_config_error() {
        let err = GeminiClient::new(
            "bad\nkey",
            "gemini-1.5-flash".into(),
            "http://localhost",
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert!(matches!(err, ChalkboardError::Config(_)));
    }
}
