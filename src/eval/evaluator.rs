use crate::animation::state::{WordPhase, is_word_active, render_state};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Fps, FrameIndex, Rect};
use crate::scene::model::{CaptionScene, SceneChunk};
use crate::style::spec::{DisplayMode, StyleSpec};

#[derive(Clone, Debug, serde::Serialize)]
/// Everything visible at one instant.
pub struct EvaluatedFrame {
    /// Query time in seconds.
    pub time: f64,
    /// Visible words in painter's order (chunk, then word).
    pub words: Vec<EvaluatedWord>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One word as it should be drawn at the query time.
pub struct EvaluatedWord {
    /// Owning chunk.
    pub chunk_index: usize,
    /// Index into the transcript.
    pub word_index: usize,
    /// Index within the chunk.
    pub local_index: usize,
    /// Text to draw.
    pub text: String,
    /// Animation phase.
    pub phase: WordPhase,
    /// Scale about the word's resting center.
    pub scale: f64,
    /// Drawn with the highlight color.
    pub is_highlighted: bool,
    /// Fill color.
    pub color: Rgba8,
    /// Scaled placement in canvas pixels.
    pub rect: Rect,
}

impl EvaluatedWord {
    /// `true` when `other` would produce the same pixels.
    pub fn same_appearance(&self, other: &Self) -> bool {
        self.scale == other.scale
            && self.is_highlighted == other.is_highlighted
            && self.color == other.color
            && self.rect == other.rect
    }
}

/// Stateless evaluator from a caption scene to per-instant word states.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(scene))]
    /// Evaluate every chunk at `t` seconds.
    pub fn eval_time(scene: &CaptionScene, t: f64) -> EvaluatedFrame {
        let mut words = Vec::new();
        for chunk in scene.chunks() {
            eval_chunk(scene.spec(), chunk, t, &mut words);
        }
        EvaluatedFrame { time: t, words }
    }

    #[tracing::instrument(skip(scene))]
    /// Evaluate output frame `frame`, sampled at `frame / fps` seconds.
    pub fn eval_frame(scene: &CaptionScene, fps: Fps, frame: FrameIndex) -> EvaluatedFrame {
        Self::eval_time(scene, fps.frames_to_secs(frame.0))
    }
}

fn chunk_visible(chunk: &SceneChunk, t: f64) -> bool {
    chunk.chunk.span().contains(t) || chunk.chunk.words.iter().any(|w| is_word_active(t, w))
}

/// Append the visible words of `chunk` at `t` to `out`.
///
/// In chunk display mode every word of a visible chunk is drawn, inactive ones at rest. In word
/// display mode only active words are drawn.
pub(crate) fn eval_chunk(spec: &StyleSpec, chunk: &SceneChunk, t: f64, out: &mut Vec<EvaluatedWord>) {
    if !chunk_visible(chunk, t) {
        return;
    }
    for (local, word) in chunk.chunk.words.iter().enumerate() {
        let state = render_state(t, &chunk.chunk, local, spec);
        if spec.display == DisplayMode::Word && !state.is_active() {
            continue;
        }
        let Some(placed) = chunk.layout.words.get(local) else {
            continue;
        };
        let color = if state.is_highlighted {
            chunk.style.highlight_color
        } else {
            chunk.word_colors[local]
        };
        out.push(EvaluatedWord {
            chunk_index: chunk.chunk.index,
            word_index: chunk.chunk.global_word_index(local),
            local_index: local,
            text: word.text.clone(),
            phase: state.phase,
            scale: state.scale,
            is_highlighted: state.is_highlighted,
            color,
            rect: placed.scaled(state.scale),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
