use anyhow::Context as _;
use rayon::prelude::*;

use crate::eval::evaluator::{EvaluatedWord, eval_chunk};
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rect, TimeSpan};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::scene::model::{CaptionScene, SceneChunk};
use crate::style::resolve::ResolvedStyle;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One word drawn unchanged over a time interval.
///
/// Consecutive frames where a word looks identical collapse into a single instruction, so a
/// steady word is one instruction and a ramping word is one per distinct scale step.
pub struct RenderInstruction {
    /// Half-open display interval in seconds, aligned to frame times.
    pub interval: TimeSpan,
    /// Owning chunk (index into [`CaptionPlan::styles`]).
    pub chunk_index: usize,
    /// Index into the transcript.
    pub word_index: usize,
    /// Text to draw.
    pub text: String,
    /// Fill color.
    pub color: Rgba8,
    /// Scale relative to the chunk font size.
    pub scale: f64,
    /// Effective font size in pixels.
    pub font_size_px: f64,
    /// Drawn with the highlight color.
    pub is_highlighted: bool,
    /// Placement in canvas pixels.
    pub rect: Rect,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Backend-agnostic caption overlay for a whole video.
pub struct CaptionPlan {
    /// Output frame size.
    pub canvas: Canvas,
    /// Frame rate the plan was sampled at.
    pub fps: Fps,
    /// Resolved style of every chunk, indexed by chunk.
    pub styles: Vec<ResolvedStyle>,
    /// Instructions sorted by interval start, then chunk, then word.
    pub instructions: Vec<RenderInstruction>,
}

impl CaptionPlan {
    /// `true` when nothing is drawn.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions whose interval covers `t`.
    pub fn active_at(&self, t: f64) -> impl Iterator<Item = &RenderInstruction> {
        self.instructions
            .iter()
            .filter(move |i| i.interval.contains(t))
    }

    /// Style of the chunk that owns `instruction`.
    pub fn style_for(&self, instruction: &RenderInstruction) -> Option<&ResolvedStyle> {
        self.styles.get(instruction.chunk_index)
    }

    /// Pretty JSON dump, used by the `plan` subcommand.
    pub fn to_json_string(&self) -> CaptionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CaptionError::serde(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Plan compilation options.
pub struct CompileOpts {
    /// Never sample at or past this frame (the source video's length).
    pub frame_limit: Option<u64>,
    /// Override rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Sample every chunk at each output frame and coalesce the results into a [`CaptionPlan`].
///
/// Chunks are compiled in parallel; the result does not depend on thread count.
#[tracing::instrument(skip(scene))]
pub fn compile_plan(
    scene: &CaptionScene,
    fps: Fps,
    opts: CompileOpts,
) -> CaptionResult<CaptionPlan> {
    let pool = build_thread_pool(opts.threads)?;
    let per_chunk: Vec<Vec<RenderInstruction>> = pool.install(|| {
        scene
            .chunks()
            .par_iter()
            .map(|chunk| compile_chunk(scene, chunk, fps, opts.frame_limit))
            .collect()
    });

    let mut instructions: Vec<RenderInstruction> = per_chunk.into_iter().flatten().collect();
    instructions.sort_by(|a, b| {
        a.interval
            .start
            .total_cmp(&b.interval.start)
            .then(a.chunk_index.cmp(&b.chunk_index))
            .then(a.word_index.cmp(&b.word_index))
    });
    tracing::info!(
        chunks = scene.chunks().len(),
        instructions = instructions.len(),
        "caption plan compiled"
    );

    Ok(CaptionPlan {
        canvas: scene.canvas(),
        fps,
        styles: scene.chunks().iter().map(|c| c.style.clone()).collect(),
        instructions,
    })
}

/// Frames at which `chunk` can be visible.
fn chunk_frames(chunk: &SceneChunk, fps: Fps, frame_limit: Option<u64>) -> FrameRange {
    let mut span = chunk.chunk.span();
    if let Some(limit) = frame_limit {
        let limit_secs = fps.frames_to_secs(limit);
        if span.start >= limit_secs {
            return FrameRange {
                start: FrameIndex(limit),
                end: FrameIndex(limit),
            };
        }
        span = TimeSpan::new(span.start, span.end.min(limit_secs));
    }
    let mut range = fps.frames_in_span(span);
    // A chunk made only of zero-length words shows on the frame landing exactly on it.
    if range.is_empty() && fps.frames_to_secs(range.start.0) == span.start {
        range.end = FrameIndex(range.start.0 + 1);
    }
    if let Some(limit) = frame_limit {
        range.end = FrameIndex(range.end.0.min(limit));
        range.start = FrameIndex(range.start.0.min(range.end.0));
    }
    range
}

fn compile_chunk(
    scene: &CaptionScene,
    chunk: &SceneChunk,
    fps: Fps,
    frame_limit: Option<u64>,
) -> Vec<RenderInstruction> {
    let font_size = f64::from(chunk.style.font_size);
    let mut open: Vec<Option<(EvaluatedWord, TimeSpan)>> = vec![None; chunk.chunk.words.len()];
    let mut out = Vec::new();
    let mut layers = Vec::new();

    for f in chunk_frames(chunk, fps, frame_limit).iter() {
        let t = fps.frames_to_secs(f.0);
        let t_next = fps.frames_to_secs(f.0 + 1);
        layers.clear();
        eval_chunk(scene.spec(), chunk, t, &mut layers);

        let mut seen = vec![false; open.len()];
        for layer in layers.drain(..) {
            let local = layer.local_index;
            seen[local] = true;
            match &mut open[local] {
                Some((prev, interval)) if interval.end == t && prev.same_appearance(&layer) => {
                    interval.end = t_next;
                }
                slot => {
                    close(slot, font_size, &mut out);
                    *slot = Some((layer, TimeSpan::new(t, t_next)));
                }
            }
        }
        for (slot, seen) in open.iter_mut().zip(seen) {
            if !seen {
                close(slot, font_size, &mut out);
            }
        }
    }
    for slot in &mut open {
        close(slot, font_size, &mut out);
    }
    out
}

fn close(
    slot: &mut Option<(EvaluatedWord, TimeSpan)>,
    font_size: f64,
    out: &mut Vec<RenderInstruction>,
) {
    if let Some((word, interval)) = slot.take() {
        out.push(RenderInstruction {
            interval,
            chunk_index: word.chunk_index,
            word_index: word.word_index,
            font_size_px: font_size * word.scale,
            text: word.text,
            color: word.color,
            scale: word.scale,
            is_highlighted: word.is_highlighted,
            rect: word.rect,
        });
    }
}

fn build_thread_pool(threads: Option<usize>) -> CaptionResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CaptionError::invalid_configuration(
            "compile 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    Ok(builder.build().context("build rayon thread pool")?)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
