use crate::caption::group::{Chunk, group_words};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, TimeSpan};
use crate::foundation::error::CaptionResult;
use crate::layout::block::{ChunkLayout, layout_chunk};
use crate::layout::measure::TextMeasure;
use crate::style::resolve::{ResolvedStyle, resolve, resolve_word_color};
use crate::style::spec::StyleSpec;
use crate::transcript::model::Transcript;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A chunk with everything needed to draw it: resolved style, resting colors and layout.
pub struct SceneChunk {
    /// The grouped words.
    pub chunk: Chunk,
    /// Chunk-level style.
    pub style: ResolvedStyle,
    /// Resting color of each word, in word order.
    pub word_colors: Vec<Rgba8>,
    /// Resting placement of each word.
    pub layout: ChunkLayout,
}

/// Everything derived from one transcript and one style for a single run.
///
/// Built once, then queried read-only by the evaluator and the plan compiler.
#[derive(Clone, Debug)]
pub struct CaptionScene {
    spec: StyleSpec,
    canvas: Canvas,
    chunks: Vec<SceneChunk>,
}

impl CaptionScene {
    /// Validate `spec` and `canvas`, group the transcript, resolve styles and lay out chunks.
    ///
    /// All configuration errors surface here, before any frame is evaluated.
    #[tracing::instrument(skip_all, fields(words = transcript.len()))]
    pub fn build(
        transcript: &Transcript,
        spec: StyleSpec,
        canvas: Canvas,
        measure: &mut dyn TextMeasure,
    ) -> CaptionResult<Self> {
        spec.validate()?;
        canvas.validate()?;

        let grouped = group_words(transcript.words(), spec.number_of_words)?;
        let mut chunks = Vec::with_capacity(grouped.len());
        for chunk in grouped {
            let style = resolve(chunk.index, &spec);
            let word_colors = (0..chunk.words.len())
                .map(|i| resolve_word_color(&style, chunk.global_word_index(i), &spec))
                .collect();
            let layout = layout_chunk(&chunk, &style, &spec, canvas, measure)?;
            chunks.push(SceneChunk {
                chunk,
                style,
                word_colors,
                layout,
            });
        }
        tracing::info!(chunks = chunks.len(), "caption scene built");

        Ok(Self {
            spec,
            canvas,
            chunks,
        })
    }

    /// The validated style.
    pub fn spec(&self) -> &StyleSpec {
        &self.spec
    }

    /// Output frame size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Chunks in order.
    pub fn chunks(&self) -> &[SceneChunk] {
        &self.chunks
    }

    /// From the first chunk's start to the latest chunk end; empty scenes span `[0, 0)`.
    pub fn span(&self) -> TimeSpan {
        let start = self.chunks.first().map_or(0.0, |c| c.chunk.start());
        let end = self
            .chunks
            .iter()
            .map(|c| c.chunk.span().end)
            .fold(start, f64::max);
        TimeSpan::new(start, end)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
