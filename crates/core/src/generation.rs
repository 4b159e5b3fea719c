//! Generation request parameters.
//!
//! Provides the color-mode and output-type enums shared by the prompt builder
//! and the normalization pipeline, plus parsing and prompt validation for
//! values arriving from the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::imaging::background::{DEFAULT_TOLERANCE, LINE_ART_TOLERANCE};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Style tag used when the client does not send one.
pub const DEFAULT_STYLE: &str = "inventory";

/// Maximum length of the user-supplied subject text, in bytes.
pub const MAX_PROMPT_LENGTH: usize = 2_000;

/// Edge length of an icon, in pixels.
pub const ICON_SIZE: u32 = 100;

/// Edge length of an illustration, in pixels.
pub const ILLUSTRATION_SIZE: u32 = 500;

// ---------------------------------------------------------------------------
// Color mode
// ---------------------------------------------------------------------------

/// Palette requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Monochrome line art.
    #[default]
    Bw,
    /// Painterly color.
    Color,
}

impl ColorMode {
    /// Parse the wire value (`"bw"` or `"color"`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "bw" => Ok(Self::Bw),
            "color" => Ok(Self::Color),
            other => Err(CoreError::Validation(format!(
                "colorMode: unknown value '{other}'. Must be one of: bw, color"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bw => "bw",
            Self::Color => "color",
        }
    }

    /// Chroma tolerance used when clearing the white background.
    pub fn background_tolerance(self) -> u8 {
        match self {
            Self::Bw => LINE_ART_TOLERANCE,
            Self::Color => DEFAULT_TOLERANCE,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Output type
// ---------------------------------------------------------------------------

/// Kind of asset to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Icon,
    Illustration,
}

impl OutputType {
    /// Parse the wire value (`"icon"` or `"illustration"`).
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "icon" => Ok(Self::Icon),
            "illustration" => Ok(Self::Illustration),
            other => Err(CoreError::Validation(format!(
                "outputType: unknown value '{other}'. Must be one of: icon, illustration"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Icon => "icon",
            Self::Illustration => "illustration",
        }
    }

    /// Final `(width, height)` of the normalized image.
    pub fn target_dimensions(self) -> (u32, u32) {
        match self {
            Self::Icon => (ICON_SIZE, ICON_SIZE),
            Self::Illustration => (ILLUSTRATION_SIZE, ILLUSTRATION_SIZE),
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the subject text: must contain non-whitespace and fit the limit.
pub fn validate_prompt(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("prompt: must not be empty".to_string()));
    }
    if text.len() > MAX_PROMPT_LENGTH {
        return Err(CoreError::Validation(format!(
            "prompt: exceeds maximum length of {MAX_PROMPT_LENGTH} characters (got {})",
            text.len()
        )));
    }
    Ok(())
}
