//! Handlers for `POST /generate` and `POST /transform`.
//!
//! Both build a prompt, make exactly one provider call, and run the returned
//! bitmap through the normalization pipeline on the blocking pool.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use iconsmith_core::error::CoreError;
use iconsmith_core::generation::{
    validate_prompt, ColorMode, OutputType, DEFAULT_STYLE, MAX_PROMPT_LENGTH,
};
use iconsmith_core::imaging::data_url::{parse_data_url, PNG_MIME};
use iconsmith_core::imaging::pipeline::{normalize, NormalizedImage};
use iconsmith_core::prompt::{build_prompt, build_transform_prompt};
use iconsmith_genai::{ContentRequest, ReferenceImage};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Status message returned with every generated image.
pub const SUCCESS_MESSAGE: &str = "Success";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub color_mode: Option<String>,
    #[serde(default)]
    pub output_type: Option<String>,
}

/// Request body for `POST /transform`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    /// Reference image as a base64 data URL or bare base64.
    #[serde(default)]
    pub image: Option<String>,
    /// Media type of a bare base64 `image`.
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub color_mode: Option<String>,
    #[serde(default)]
    pub output_type: Option<String>,
}

/// Response for both generation endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    /// `data:image/png;base64,...`
    pub image: String,
    pub message: String,
    pub output_type: OutputType,
}

/// Resolved style parameters with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub style: String,
    pub color_mode: ColorMode,
    pub output_type: OutputType,
}

impl GenerationOptions {
    /// Apply defaults and validate the enum-valued fields.
    pub fn resolve(
        style: Option<&str>,
        color_mode: Option<&str>,
        output_type: Option<&str>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            style: style.unwrap_or(DEFAULT_STYLE).to_string(),
            color_mode: color_mode.map(ColorMode::parse).transpose()?.unwrap_or_default(),
            output_type: output_type
                .map(OutputType::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/generate
///
/// Text-to-image generation. Requires a valid bearer token.
pub async fn generate(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<GenerateRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(input) = body?;
    let subject = input
        .prompt
        .ok_or_else(|| CoreError::Validation("prompt: is required".into()))?;
    validate_prompt(&subject)?;

    let options = GenerationOptions::resolve(
        input.style.as_deref(),
        input.color_mode.as_deref(),
        input.output_type.as_deref(),
    )?;

    let prompt = build_prompt(
        &subject,
        &options.style,
        options.color_mode,
        options.output_type,
    );

    tracing::info!(
        user_id = auth.user_id,
        color_mode = %options.color_mode,
        output_type = %options.output_type,
        "Generating image"
    );

    let generated = state.generator.generate(ContentRequest::text(prompt)).await?;
    tracing::debug!(
        mime_type = %generated.mime_type,
        bytes = generated.bytes.len(),
        "Provider returned image"
    );

    let normalized =
        normalize_on_blocking_pool(generated.bytes, options.color_mode, options.output_type)
            .await?;

    Ok(Json(GenerateResponse {
        image: normalized.data_url,
        message: SUCCESS_MESSAGE.to_string(),
        output_type: options.output_type,
    }))
}

/// POST /api/transform
///
/// Redraw a client-supplied reference image in the house style. Requires a
/// valid bearer token.
pub async fn transform(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<TransformRequest>, JsonRejection>,
) -> AppResult<Json<GenerateResponse>> {
    let Json(input) = body?;
    let raw = input
        .image
        .ok_or_else(|| CoreError::Validation("image: is required".into()))?;
    let payload = parse_data_url(&raw)?;

    let mime_type = payload
        .mime_type
        .or(input.mime_type)
        .unwrap_or_else(|| PNG_MIME.to_string());
    if !mime_type.starts_with("image/") {
        return Err(AppError::Core(CoreError::Validation(format!(
            "mimeType: '{mime_type}' is not an image type"
        ))));
    }

    if let Some(subject) = input.prompt.as_deref() {
        if subject.len() > MAX_PROMPT_LENGTH {
            return Err(AppError::Core(CoreError::Validation(format!(
                "prompt: exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {})",
                subject.len()
            ))));
        }
    }

    let options = GenerationOptions::resolve(
        input.style.as_deref(),
        input.color_mode.as_deref(),
        input.output_type.as_deref(),
    )?;

    let prompt = build_transform_prompt(
        input.prompt.as_deref(),
        &options.style,
        options.color_mode,
        options.output_type,
    );

    tracing::info!(
        user_id = auth.user_id,
        color_mode = %options.color_mode,
        output_type = %options.output_type,
        reference_bytes = payload.bytes.len(),
        "Transforming image"
    );

    let reference = ReferenceImage {
        mime_type,
        bytes: payload.bytes,
    };
    let generated = state
        .generator
        .generate(ContentRequest::with_reference(prompt, reference))
        .await?;

    let normalized =
        normalize_on_blocking_pool(generated.bytes, options.color_mode, options.output_type)
            .await?;

    Ok(Json(GenerateResponse {
        image: normalized.data_url,
        message: SUCCESS_MESSAGE.to_string(),
        output_type: options.output_type,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the CPU-bound pipeline off the async workers.
async fn normalize_on_blocking_pool(
    bytes: Vec<u8>,
    color_mode: ColorMode,
    output_type: OutputType,
) -> AppResult<NormalizedImage> {
    let normalized = tokio::task::spawn_blocking(move || normalize(&bytes, color_mode, output_type))
        .await
        .map_err(|e| AppError::InternalError(format!("Normalization task failed: {e}")))??;
    Ok(normalized)
}
