//! The image-generation seam used by request handlers.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::api::{GeminiApi, GenAiError};
use crate::messages::{GenerateContentRequest, GenerateContentResponse, Part};

/// Media type assumed when the provider omits one.
pub const FALLBACK_MIME: &str = "image/png";

/// Reference image sent along with a transform prompt.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// One generation call: a text instruction plus an optional reference image.
#[derive(Debug, Clone)]
pub struct ContentRequest {
    pub prompt: String,
    pub reference: Option<ReferenceImage>,
}

impl ContentRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            reference: None,
        }
    }

    pub fn with_reference(prompt: impl Into<String>, reference: ReferenceImage) -> Self {
        Self {
            prompt: prompt.into(),
            reference: Some(reference),
        }
    }
}

/// Raw bitmap returned by the provider.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Something that turns a prompt into image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Make exactly one provider call.
    async fn generate(&self, request: ContentRequest) -> Result<GeneratedImage, GenAiError>;
}

#[async_trait]
impl ImageGenerator for GeminiApi {
    async fn generate(&self, request: ContentRequest) -> Result<GeneratedImage, GenAiError> {
        let mut parts = Vec::with_capacity(2);
        if let Some(reference) = &request.reference {
            parts.push(Part::inline(
                reference.mime_type.clone(),
                STANDARD.encode(&reference.bytes),
            ));
        }
        parts.push(Part::text(request.prompt));

        tracing::debug!(
            model = %self.model(),
            has_reference = request.reference.is_some(),
            "Sending generateContent request"
        );

        let response = self
            .generate_content(&GenerateContentRequest::image_request(parts))
            .await?;

        extract_image(&response)
    }
}

/// Pull the first inline image out of a provider response.
///
/// Falls back to the text explanation, then to the block reason, when no
/// inline data is present.
pub fn extract_image(response: &GenerateContentResponse) -> Result<GeneratedImage, GenAiError> {
    if let Some(inline) = response.first_inline_data() {
        let bytes = STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GenAiError::InvalidPayload(e.to_string()))?;
        let mime_type = if inline.mime_type.is_empty() {
            FALLBACK_MIME.to_string()
        } else {
            inline.mime_type.clone()
        };
        return Ok(GeneratedImage { mime_type, bytes });
    }

    if let Some(text) = response.text() {
        return Err(GenAiError::TextOnly(text));
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone())
    {
        return Err(GenAiError::Blocked(reason));
    }

    Err(GenAiError::Empty)
}
