//! Gemini image-generation client.
//!
//! Provides typed request/response messages, a REST wrapper around the
//! `generateContent` endpoint, and the [`generator::ImageGenerator`] trait the
//! HTTP layer depends on.

pub mod api;
pub mod config;
pub mod generator;
pub mod messages;

pub use api::{GeminiApi, GenAiError};
pub use config::GeminiConfig;
pub use generator::{ContentRequest, GeneratedImage, ImageGenerator, ReferenceImage};
