//! Chroma-threshold background removal.
//!
//! Generated assets are drawn on a pure white background. Any pixel whose
//! red, green and blue channels all exceed the tolerance is replaced by fully
//! transparent white. The map is strictly per pixel: isolated near-white
//! pixels inside the subject are cleared as well.

use image::{Rgba, RgbaImage};

/// Tolerance for painterly (color) content.
pub const DEFAULT_TOLERANCE: u8 = 240;

/// Tolerance for high-contrast line art (black and white).
pub const LINE_ART_TOLERANCE: u8 = 200;

/// The value written into cleared pixels.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Whether a pixel counts as background for the given tolerance.
#[inline]
pub fn is_background(pixel: &Rgba<u8>, tolerance: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > tolerance && g > tolerance && b > tolerance
}

/// Clear background pixels in place. Returns the number of pixels cleared.
pub fn remove_background(image: &mut RgbaImage, tolerance: u8) -> usize {
    let mut cleared = 0;
    for pixel in image.pixels_mut() {
        if is_background(pixel, tolerance) {
            *pixel = TRANSPARENT_WHITE;
            cleared += 1;
        }
    }
    cleared
}

/// Non-mutating variant of [`remove_background`].
pub fn remove_background_copy(image: &RgbaImage, tolerance: u8) -> RgbaImage {
    let mut out = image.clone();
    remove_background(&mut out, tolerance);
    out
}
