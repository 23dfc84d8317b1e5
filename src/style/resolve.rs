use crate::foundation::color::Rgba8;
use crate::style::spec::{ColorCycle, Position, StyleSpec, TextAlign};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Styling of one chunk, computed from its index and the run's [`StyleSpec`].
pub struct ResolvedStyle {
    /// Chunk this style belongs to.
    pub chunk_index: usize,
    /// Shared chunk color.
    pub color: Rgba8,
    /// Font file path.
    pub font: String,
    /// Font size in pixels at scale 1.0.
    pub font_size: u32,
    /// Vertical anchor.
    pub position: Position,
    /// Line alignment.
    pub text_align: TextAlign,
    /// Outline color.
    pub stroke_color: Rgba8,
    /// Outline width in pixels.
    pub stroke_width: u32,
    /// Box color behind words (transparent = none).
    pub bg_color: Rgba8,
    /// Color of the highlighted word.
    pub highlight_color: Rgba8,
}

/// Resolve the style of chunk `chunk_index`.
///
/// Pure: the same `(chunk_index, spec)` always yields the same result. `spec` is assumed to
/// have passed [`StyleSpec::validate`].
pub fn resolve(chunk_index: usize, spec: &StyleSpec) -> ResolvedStyle {
    let o = spec.chunk_overrides.get(&chunk_index);
    ResolvedStyle {
        chunk_index,
        color: o
            .and_then(|o| o.color)
            .unwrap_or_else(|| spec.text_colors.cycle(chunk_index)),
        font: spec.font.clone(),
        font_size: o.and_then(|o| o.font_size).unwrap_or(spec.font_size),
        position: o.and_then(|o| o.position).unwrap_or(spec.position),
        text_align: spec.text_align,
        stroke_color: spec.stroke_color,
        stroke_width: spec.stroke_width,
        bg_color: spec.bg_color,
        highlight_color: spec.highlight_color,
    }
}

/// Resting color of a single word.
///
/// With [`ColorCycle::Word`] the palette advances per transcript word; a chunk color override
/// still wins.
pub fn resolve_word_color(
    chunk: &ResolvedStyle,
    word_index: usize,
    spec: &StyleSpec,
) -> Rgba8 {
    let overridden = spec
        .chunk_overrides
        .get(&chunk.chunk_index)
        .is_some_and(|o| o.color.is_some());
    match spec.color_cycle {
        ColorCycle::Word if !overridden => spec.text_colors.cycle(word_index),
        _ => chunk.color,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/resolve.rs"]
mod tests;
