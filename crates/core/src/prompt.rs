//! Prompt composition for the image provider.
//!
//! The instruction sent to the provider is assembled from three fixed parts
//! and the user's subject:
//!
//! 1. a style description picked by output type x color mode,
//! 2. a requirements suffix picked by output type,
//! 3. a fixed "no text" rule,
//! 4. the subject, verbatim.
//!
//! The `style` tag from the client is accepted but does not change the
//! output.

use crate::generation::{ColorMode, OutputType};

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const ICON_BW_STYLE: &str = "Style: Red Dead Redemption 2 inventory icon. \
    Black ink woodcut or lithograph aesthetic, high contrast, thick lines, \
    monochrome black and dark grey only.";

const ICON_COLOR_STYLE: &str = "Style: Red Dead Redemption 2 inventory icon in color. \
    Hand-drawn ink outlines with muted western earth tones and faded dyes, \
    bold readable silhouette.";

const ILLUSTRATION_BW_STYLE: &str = "Style: Red Dead Redemption 2 catalog illustration. \
    Black ink engraving with fine cross-hatching, lithograph print aesthetic, \
    monochrome only.";

const ILLUSTRATION_COLOR_STYLE: &str = "Style: Red Dead Redemption 2 catalog illustration. \
    Vintage watercolor and colored pencil aesthetic, realistic but hand-drawn, \
    muted authentic western colors.";

const ICON_REQUIREMENTS: &str =
    "REQUIREMENTS: simple shape, bold lines, isolated on pure white background.";

const ILLUSTRATION_REQUIREMENTS: &str =
    "REQUIREMENTS: artistic composition, isolated on pure white background, no borders.";

const NO_TEXT_RULE: &str = "NO TEXT, labels, letters, signatures or numbers.";

/// Subject used by [`build_transform_prompt`] when the client sends none.
pub const DEFAULT_TRANSFORM_SUBJECT: &str = "Convert this image into an RDR2 icon.";

/// Style description for an output type and color mode.
pub fn style_description(color_mode: ColorMode, output_type: OutputType) -> &'static str {
    match (output_type, color_mode) {
        (OutputType::Icon, ColorMode::Bw) => ICON_BW_STYLE,
        (OutputType::Icon, ColorMode::Color) => ICON_COLOR_STYLE,
        (OutputType::Illustration, ColorMode::Bw) => ILLUSTRATION_BW_STYLE,
        (OutputType::Illustration, ColorMode::Color) => ILLUSTRATION_COLOR_STYLE,
    }
}

/// Requirements suffix for an output type.
pub fn requirements(output_type: OutputType) -> &'static str {
    match output_type {
        OutputType::Icon => ICON_REQUIREMENTS,
        OutputType::Illustration => ILLUSTRATION_REQUIREMENTS,
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Compose the text-to-image instruction.
///
/// Deterministic: the same inputs always yield the same string.
pub fn build_prompt(
    prompt: &str,
    _style: &str,
    color_mode: ColorMode,
    output_type: OutputType,
) -> String {
    format!(
        "{} {} {} Subject: {}",
        style_description(color_mode, output_type),
        requirements(output_type),
        NO_TEXT_RULE,
        prompt,
    )
}

/// Compose the instruction sent alongside a reference image.
pub fn build_transform_prompt(
    prompt: Option<&str>,
    _style: &str,
    color_mode: ColorMode,
    output_type: OutputType,
) -> String {
    let focus = match color_mode {
        ColorMode::Bw => "Convert to a black and white woodcut or lithograph.",
        ColorMode::Color => "Convert to a vintage color illustration.",
    };
    let subject = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_TRANSFORM_SUBJECT);

    format!(
        "{} Task: Redraw the provided image in this style. {} \
         Remove the original background and place the subject on pure white. {} {} \
         Additional context: {}",
        style_description(color_mode, output_type),
        focus,
        requirements(output_type),
        NO_TEXT_RULE,
        subject,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bw_icon_prompt_contains_subject_and_requirements() {
        let prompt = build_prompt("a revolver", "inventory", ColorMode::Bw, OutputType::Icon);
        assert!(prompt.contains("a revolver"));
        assert!(prompt.contains("pure white background"));
        assert!(prompt.contains("bold lines"));
    }

    #[test]
    fn illustration_prompt_uses_illustration_suffix() {
        let prompt = build_prompt(
            "a saddle",
            "inventory",
            ColorMode::Color,
            OutputType::Illustration,
        );
        assert!(prompt.contains("no borders"));
        assert!(prompt.contains("artistic composition"));
        assert!(!prompt.contains("bold lines"));
        assert!(prompt.ends_with("Subject: a saddle"));
    }

    #[test]
    fn four_distinct_style_templates() {
        let mut all = vec![
            style_description(ColorMode::Bw, OutputType::Icon),
            style_description(ColorMode::Color, OutputType::Icon),
            style_description(ColorMode::Bw, OutputType::Illustration),
            style_description(ColorMode::Color, OutputType::Illustration),
        ];
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn style_tag_does_not_change_output() {
        let a = build_prompt("a lantern", "inventory", ColorMode::Bw, OutputType::Icon);
        let b = build_prompt("a lantern", "woodcut", ColorMode::Bw, OutputType::Icon);
        assert_eq!(a, b);
    }

    #[test]
    fn subject_is_passed_verbatim() {
        let subject = "a \"bowie\" knife {with} <odd> chars";
        let prompt = build_prompt(subject, "inventory", ColorMode::Bw, OutputType::Icon);
        assert!(prompt.contains(subject));
    }

    #[test]
    fn transform_prompt_falls_back_to_default_subject() {
        let prompt = build_transform_prompt(Some("  "), "inventory", ColorMode::Bw, OutputType::Icon);
        assert!(prompt.contains(DEFAULT_TRANSFORM_SUBJECT));
        assert!(prompt.contains("woodcut"));
        assert!(prompt.contains("pure white"));
    }

    #[test]
    fn transform_prompt_keeps_given_subject() {
        let prompt = build_transform_prompt(
            Some("make it rusty"),
            "inventory",
            ColorMode::Color,
            OutputType::Illustration,
        );
        assert!(prompt.contains("make it rusty"));
        assert!(prompt.contains("vintage color illustration"));
    }
}
