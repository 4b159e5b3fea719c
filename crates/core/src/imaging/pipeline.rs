//! Normalization pipeline for provider output.
//!
//! Steps run strictly in order:
//!
//! 1. Decode PNG/JPEG/WebP bytes into an RGBA grid (opaque alpha synthesized
//!    for sources without an alpha channel).
//! 2. Clear the white background with the tolerance for the color mode.
//! 3. Resize to the exact target size for the output type with Lanczos3.
//! 4. Re-encode as PNG.
//! 5. Wrap as a base64 data URL.
//!
//! Every step is synchronous. Callers on an async runtime should run
//! [`normalize`] on the blocking pool.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, RgbaImage};

use super::background::remove_background;
use super::data_url::{encode_data_url, PNG_MIME};
use super::ImagingError;
use crate::generation::{ColorMode, OutputType};

/// Resampling filter used for the final resize.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Result of a successful normalization.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub width: u32,
    pub height: u32,
    /// Encoded PNG bytes.
    pub png: Vec<u8>,
    /// `data:image/png;base64,...` form of [`Self::png`].
    pub data_url: String,
}

/// Decode raw image bytes into RGBA8.
pub fn decode_rgba(source: &[u8]) -> Result<RgbaImage, ImagingError> {
    let decoded =
        image::load_from_memory(source).map_err(|e| ImagingError::Decode(e.to_string()))?;
    Ok(decoded.into_rgba8())
}

/// Resize to exactly `width` x `height`, ignoring the source aspect ratio.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, RESIZE_FILTER)
}

/// Encode an RGBA image as PNG.
pub fn encode_png(image: RgbaImage) -> Result<Vec<u8>, ImagingError> {
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| ImagingError::Encode(e.to_string()))?;
    Ok(out)
}

/// Run the full pipeline on provider bytes.
pub fn normalize(
    source: &[u8],
    color_mode: ColorMode,
    output_type: OutputType,
) -> Result<NormalizedImage, ImagingError> {
    let mut rgba = decode_rgba(source)?;

    remove_background(&mut rgba, color_mode.background_tolerance());

    let (width, height) = output_type.target_dimensions();
    let resized = resize_exact(&rgba, width, height);

    let png = encode_png(resized)?;
    let data_url = encode_data_url(PNG_MIME, &png);

    Ok(NormalizedImage {
        width,
        height,
        png,
        data_url,
    })
}
