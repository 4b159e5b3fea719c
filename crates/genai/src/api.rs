//! REST client for the Gemini `generateContent` endpoint.
//!
//! Wraps a single long-lived [`reqwest::Client`] whose request timeout bounds
//! every provider call. No retries are attempted.

use std::time::Duration;

use crate::config::GeminiConfig;
use crate::messages::{GenerateContentRequest, GenerateContentResponse};

/// Errors from the provider layer.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider did not answer within the configured bound.
    #[error("Provider call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The prompt was rejected before generation.
    #[error("Prompt was blocked by the provider: {0}")]
    Blocked(String),

    /// The model answered with text only.
    #[error("Model returned text instead of an image: {0}")]
    TextOnly(String),

    /// The response carried neither an image nor text.
    #[error("Model returned no data")]
    Empty,

    /// The inline payload could not be decoded.
    #[error("Invalid inline image payload: {0}")]
    InvalidPayload(String),
}

/// HTTP client for the Gemini API.
pub struct GeminiApi {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiApi {
    /// Create a client with the configured timeout applied to every request.
    pub fn new(config: GeminiConfig) -> Result<Self, GenAiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Full URL of the `generateContent` endpoint for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Send one `generateContent` call.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = Self::ensure_success(response).await?;
        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| self.classify(e))
    }

    // ---- private helpers ----

    /// Turn a reqwest timeout into [`GenAiError::Timeout`].
    fn classify(&self, err: reqwest::Error) -> GenAiError {
        if err.is_timeout() {
            GenAiError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            GenAiError::Request(err)
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GenAiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            base_url: "http://localhost:9".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn endpoint_includes_model() {
        let api = GeminiApi::new(test_config()).unwrap();
        assert_eq!(
            api.endpoint(),
            "http://localhost:9/models/gemini-2.5-flash-image:generateContent"
        );
        assert_eq!(api.model(), "gemini-2.5-flash-image");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = GenAiError::TextOnly("I cannot draw that".into());
        assert_eq!(
            err.to_string(),
            "Model returned text instead of an image: I cannot draw that"
        );
        assert_eq!(GenAiError::Empty.to_string(), "Model returned no data");
    }
}
