use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use iconsmith_core::error::CoreError;
use iconsmith_core::imaging::ImagingError;
use iconsmith_genai::GenAiError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds dependency and
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// `{"error", "code"}` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `iconsmith_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The image provider failed or returned nothing usable.
    #[error("Generation error: {0}")]
    Generation(#[from] GenAiError),

    /// The provider's image could not be decoded, resized, or encoded.
    #[error("Image processing error: {0}")]
    Imaging(#[from] ImagingError),

    /// The request body was not acceptable JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Client-facing message for every 500 that carries no safe detail.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Dependencies ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
            AppError::Generation(err) => classify_generation_error(err),
            AppError::Imaging(err) => {
                tracing::error!(error = %err, "Image normalization failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DEPENDENCY_ERROR",
                    "The generated image could not be processed".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::InvalidBody(rejection) => classify_body_rejection(rejection),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a JSON body rejection onto the error envelope.
///
/// An over-limit body keeps its 413; everything else (wrong content type,
/// malformed JSON, wrong field types) is a 400 validation error.
fn classify_body_rejection(rejection: &JsonRejection) -> (StatusCode, &'static str, String) {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            "PAYLOAD_TOO_LARGE",
            "Request body is too large".to_string(),
        );
    }
    (
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        rejection.body_text(),
    )
}

/// Map a provider error to a 500 with a client-safe message.
///
/// Model-level outcomes (text reply, empty reply, blocked prompt, timeout) are
/// reported verbatim. Transport and upstream API failures are logged in full
/// and answered tersely.
fn classify_generation_error(err: &GenAiError) -> (StatusCode, &'static str, String) {
    match err {
        GenAiError::TextOnly(_)
        | GenAiError::Empty
        | GenAiError::Blocked(_)
        | GenAiError::Timeout { .. } => {
            tracing::warn!(error = %err, "Provider returned no usable image");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DEPENDENCY_ERROR",
                err.to_string(),
            )
        }
        GenAiError::Request(_) | GenAiError::ApiError { .. } | GenAiError::InvalidPayload(_) => {
            tracing::error!(error = %err, "Provider call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DEPENDENCY_ERROR",
                "Image provider request failed".to_string(),
            )
        }
    }
}
