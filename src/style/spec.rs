use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::ease::Ease;
use crate::foundation::color::Rgba8;
use crate::foundation::error::{CaptionError, CaptionResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Caption styling for one run.
///
/// Built once (usually from a JSON style file), validated once with
/// [`StyleSpec::validate`], then threaded by reference through grouping, style resolution
/// and animation. Every field has a default, so `{}` is a complete style.
pub struct StyleSpec {
    /// Words per caption chunk.
    pub number_of_words: usize,
    /// Path to the font file used for measuring and drawing.
    pub font: String,
    /// Font size in pixels at scale 1.0.
    pub font_size: u32,
    /// Vertical anchor of the caption block.
    pub position: Position,
    /// Horizontal alignment of each caption line.
    pub text_align: TextAlign,
    /// Ordered color palette, cycled per chunk or per word.
    pub text_colors: Palette,
    /// Outline color.
    pub stroke_color: Rgba8,
    /// Outline width in pixels (0 disables it).
    pub stroke_width: u32,
    /// Box color behind each word; `transparent` disables the box.
    pub bg_color: Rgba8,
    /// Zoom-in each word at the start of its active interval.
    pub transition: bool,
    /// Recolor the word being spoken.
    pub highlight: bool,
    /// Color of the highlighted word.
    pub highlight_color: Rgba8,
    /// Mix [`StyleSpec::intro_sound`] into the output audio at t=0.
    pub has_intro_sound: bool,
    /// Path to the intro sound.
    pub intro_sound: String,
    /// Optional video drawn over the source, under the captions.
    pub overlay: Option<String>,
    /// Whether the palette cycles per chunk or per word.
    pub color_cycle: ColorCycle,
    /// Whether a whole chunk or only the spoken word is on screen.
    pub display: DisplayMode,
    /// Zoom-in ramp parameters (used when `transition` is on).
    pub zoom: ZoomSpec,
    /// Inset from the frame edges in pixels.
    pub margin: u32,
    /// Line height multiplier for wrapped captions.
    pub line_spacing: f64,
    /// Per-chunk style overrides keyed by chunk index.
    pub chunk_overrides: BTreeMap<usize, StyleOverride>,
}

impl Default for StyleSpec {
    fn default() -> Self {
        Self {
            number_of_words: 3,
            font: "fonts/Roboto-Black.ttf".to_owned(),
            font_size: 100,
            position: Position::Center,
            text_align: TextAlign::Center,
            text_colors: Palette::default(),
            stroke_color: Rgba8::rgb(0, 0, 0),
            stroke_width: 6,
            bg_color: Rgba8::transparent(),
            transition: true,
            highlight: false,
            highlight_color: Rgba8::rgb(255, 255, 0),
            has_intro_sound: false,
            intro_sound: "sounds/intro.mp3".to_owned(),
            overlay: None,
            color_cycle: ColorCycle::Chunk,
            display: DisplayMode::Chunk,
            zoom: ZoomSpec::default(),
            margin: 40,
            line_spacing: 1.0,
            chunk_overrides: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Vertical anchor of the caption block.
pub enum Position {
    /// Top edge, inset by the margin.
    Top,
    /// Vertically centered.
    #[default]
    Center,
    /// Bottom edge, inset by the margin.
    Bottom,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Horizontal alignment of caption lines.
pub enum TextAlign {
    /// Flush with the left margin.
    Left,
    /// Centered on the frame.
    #[default]
    Center,
    /// Flush with the right margin.
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Palette cycling granularity.
pub enum ColorCycle {
    /// `palette[chunk_index % len]`.
    #[default]
    Chunk,
    /// `palette[word_index % len]` over the whole transcript.
    Word,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// What is on screen while a chunk is being spoken.
pub enum DisplayMode {
    /// The whole chunk; words outside their active interval are drawn at rest.
    #[default]
    Chunk,
    /// Only words inside their active interval.
    Word,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Zoom-in ramp: the first `ramp_fraction` of each word scales from `start_scale` to 1.
pub struct ZoomSpec {
    /// Share of the word's interval spent ramping, in `[0, 1]`.
    pub ramp_fraction: f64,
    /// Scale at the start of the ramp (> 0).
    pub start_scale: f64,
    /// Curve mapping ramp progress to scale.
    pub ease: Ease,
}

impl Default for ZoomSpec {
    fn default() -> Self {
        Self {
            ramp_fraction: 0.2,
            start_scale: 0.8,
            ease: Ease::Linear,
        }
    }
}

impl ZoomSpec {
    /// Reject ramp fractions outside `[0, 1]` and non-positive start scales.
    pub fn validate(&self) -> CaptionResult<()> {
        if !self.ramp_fraction.is_finite() || !(0.0..=1.0).contains(&self.ramp_fraction) {
            return Err(CaptionError::invalid_configuration(format!(
                "zoom.ramp_fraction must be within [0, 1], got {}",
                self.ramp_fraction
            )));
        }
        if !self.start_scale.is_finite() || self.start_scale <= 0.0 {
            return Err(CaptionError::invalid_configuration(format!(
                "zoom.start_scale must be finite and > 0, got {}",
                self.start_scale
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Per-chunk replacements for the global style.
pub struct StyleOverride {
    /// Replaces the palette color for every word of the chunk.
    pub color: Option<Rgba8>,
    /// Replaces the vertical anchor.
    pub position: Option<Position>,
    /// Replaces the font size.
    pub font_size: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Rgba8>", into = "Vec<Rgba8>")]
/// Non-empty ordered list of caption colors.
pub struct Palette(Vec<Rgba8>);

impl Palette {
    /// Build a palette, rejecting an empty color list.
    pub fn new(colors: Vec<Rgba8>) -> CaptionResult<Self> {
        if colors.is_empty() {
            return Err(CaptionError::invalid_configuration(
                "text_colors must contain at least one color",
            ));
        }
        Ok(Self(colors))
    }

    /// Color at `index`, wrapping around the palette.
    pub fn cycle(&self, index: usize) -> Rgba8 {
        self.0[index % self.0.len()]
    }

    /// Colors in order.
    pub fn colors(&self) -> &[Rgba8] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        let sky = Rgba8::rgb(0x00, 0xBF, 0xFF);
        let green = Rgba8::rgb(0x90, 0xEE, 0x90);
        let gold = Rgba8::rgb(0xFF, 0xD7, 0x00);
        Self(vec![sky, sky, sky, green, green, green, gold, gold, gold])
    }
}

impl TryFrom<Vec<Rgba8>> for Palette {
    type Error = CaptionError;

    fn try_from(colors: Vec<Rgba8>) -> CaptionResult<Self> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Rgba8> {
    fn from(p: Palette) -> Self {
        p.0
    }
}

impl StyleSpec {
    /// Parse a style from a JSON reader. Parse failures are configuration errors.
    pub fn from_reader<R: std::io::Read>(r: R) -> CaptionResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CaptionError::invalid_configuration(format!("parse style JSON: {e}")))
    }

    /// Parse a style from a JSON string.
    pub fn from_json_str(s: &str) -> CaptionResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| CaptionError::invalid_configuration(format!("parse style JSON: {e}")))
    }

    /// Parse a style from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CaptionError::invalid_configuration(format!(
                "open style JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every invariant the engine relies on. Called once per run.
    pub fn validate(&self) -> CaptionResult<()> {
        if self.number_of_words == 0 {
            return Err(CaptionError::invalid_configuration(
                "number_of_words must be > 0",
            ));
        }
        if self.font.trim().is_empty() {
            return Err(CaptionError::invalid_configuration("font must be non-empty"));
        }
        if self.font_size == 0 {
            return Err(CaptionError::invalid_configuration("font_size must be > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing <= 0.0 {
            return Err(CaptionError::invalid_configuration(
                "line_spacing must be finite and > 0",
            ));
        }
        self.zoom.validate()?;
        if self.has_intro_sound && self.intro_sound.trim().is_empty() {
            return Err(CaptionError::invalid_configuration(
                "intro_sound must be set when has_intro_sound is true",
            ));
        }
        if let Some(overlay) = &self.overlay
            && overlay.trim().is_empty()
        {
            return Err(CaptionError::invalid_configuration(
                "overlay must be non-empty when set",
            ));
        }
        for (index, o) in &self.chunk_overrides {
            if o.font_size == Some(0) {
                return Err(CaptionError::invalid_configuration(format!(
                    "chunk_overrides.{index}.font_size must be > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/spec.rs"]
mod tests;
