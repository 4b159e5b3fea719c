//! Image post-processing for generated assets.
//!
//! - [`background`] -- per-pixel chroma-threshold background removal.
//! - [`pipeline`] -- decode, clear background, resize, re-encode as PNG.
//! - [`data_url`] -- `data:<mime>;base64,<payload>` encoding and parsing.

pub mod background;
pub mod data_url;
pub mod pipeline;

/// Errors raised while normalizing an image.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    /// The source bytes are not a supported or well-formed raster image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Re-encoding the processed image failed.
    #[error("Failed to encode image: {0}")]
    Encode(String),
}
