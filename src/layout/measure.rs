use std::path::Path;

use crate::foundation::error::{CaptionError, CaptionResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Measured size of a run of text in pixels.
pub struct TextExtent {
    /// Advance width.
    pub width: f64,
    /// Line height (ascent + descent + leading).
    pub height: f64,
}

/// Text measuring seam used by caption layout.
pub trait TextMeasure {
    /// Measure `text` set on a single line at `size_px`.
    fn measure(&mut self, text: &str, size_px: f32) -> CaptionResult<TextExtent>;

    /// Width of the gap placed between two words.
    fn word_gap(&mut self, size_px: f32) -> CaptionResult<f64> {
        let spaced = self.measure("x x", size_px)?.width;
        let tight = self.measure("xx", size_px)?.width;
        Ok((spaced - tight).max(f64::from(size_px) * 0.2))
    }
}

/// Font-free measure: every character advances `advance_em * size`.
///
/// Deterministic and cheap; used for plan previews without a font file and in tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceMeasure {
    /// Advance per character as a fraction of the font size.
    pub advance_em: f64,
    /// Line height as a fraction of the font size.
    pub line_height_em: f64,
}

impl Default for FixedAdvanceMeasure {
    fn default() -> Self {
        Self {
            advance_em: 0.6,
            line_height_em: 1.2,
        }
    }
}

impl TextMeasure for FixedAdvanceMeasure {
    fn measure(&mut self, text: &str, size_px: f32) -> CaptionResult<TextExtent> {
        let size = f64::from(size_px);
        Ok(TextExtent {
            width: text.chars().count() as f64 * self.advance_em * size,
            height: self.line_height_em * size,
        })
    }

    fn word_gap(&mut self, size_px: f32) -> CaptionResult<f64> {
        Ok(self.advance_em * f64::from(size_px))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct MeasureBrush;

/// Shapes text with Parley using the caption font, for exact advances.
pub struct FontMeasure {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<MeasureBrush>,
    family_name: String,
}

impl std::fmt::Debug for FontMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMeasure")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl FontMeasure {
    /// Register the font in `font_bytes` and measure with its first family.
    pub fn from_bytes(font_bytes: &[u8]) -> CaptionResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CaptionError::invalid_configuration("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                CaptionError::invalid_configuration("registered font family has no name")
            })?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Read a font file and register it (see [`FontMeasure::from_bytes`]).
    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CaptionError::invalid_configuration(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Family name resolved from the font data.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

impl TextMeasure for FontMeasure {
    fn measure(&mut self, text: &str, size_px: f32) -> CaptionResult<TextExtent> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CaptionError::invalid_configuration(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(MeasureBrush));

        let mut layout: parley::Layout<MeasureBrush> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent + m.leading);
        }
        Ok(TextExtent { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
