//! Wordcap burns word-by-word animated captions into videos.
//!
//! A timestamped transcript is grouped into short caption chunks, each chunk is styled and laid
//! out once, and every word is animated as a pure function of time. The result is a
//! backend-agnostic [`CaptionPlan`] that a [`Compositor`] draws over the source video.
//!
//! # Pipeline overview
//!
//! 1. **Transcribe**: video audio -> [`Transcript`] (external `whisper`, or a JSON file)
//! 2. **Build**: `Transcript + StyleSpec -> CaptionScene` (grouping, style resolution, layout)
//! 3. **Evaluate**: `CaptionScene + time -> EvaluatedFrame` (per-word scale and highlight)
//! 4. **Compile**: sample every frame and coalesce into [`RenderInstruction`]s
//! 5. **Composite**: hand the plan to the system `ffmpeg` binary (`drawtext` filters)
//!
//! Steps 2 to 4 are pure and deterministic; all configuration errors surface in step 2.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod caption;
mod compile;
mod encode;
mod eval;
mod foundation;
mod layout;
mod pipeline;
mod scene;
mod style;
mod transcript;

pub use animation::ease::Ease;
pub use animation::state::{
    WordPhase, WordState, highlighted_word, is_word_active, render_state, word_phase,
};
pub use caption::group::{Chunk, group_words};
pub use compile::plan::{CaptionPlan, CompileOpts, RenderInstruction, compile_plan};
pub use encode::compositor::{CompositeJob, Compositor, InMemoryCompositor};
pub use encode::drawtext::{AudioMap, FilterGraph, FilterInputs, build_filter_graph};
pub use encode::ffmpeg::{
    FfmpegCompositor, VideoInfo, ensure_parent_dir, extract_audio_wav, is_ffmpeg_on_path,
    probe_video,
};
pub use eval::evaluator::{EvaluatedFrame, EvaluatedWord, Evaluator};
pub use foundation::color::Rgba8;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Rect, TimeSpan};
pub use foundation::error::{CaptionError, CaptionResult};
pub use layout::block::{BlockParams, ChunkLayout, WordBox, layout_chunk, layout_words};
pub use layout::measure::{FixedAdvanceMeasure, FontMeasure, TextExtent, TextMeasure};
pub use pipeline::{
    CaptionOpts, CaptionReport, caption_video, default_output_path, plan_captions,
};
pub use scene::model::{CaptionScene, SceneChunk};
pub use style::resolve::{ResolvedStyle, resolve, resolve_word_color};
pub use style::spec::{
    ColorCycle, DisplayMode, Palette, Position, StyleOverride, StyleSpec, TextAlign, ZoomSpec,
};
pub use transcript::model::{Transcript, Word};
pub use transcript::whisper::{Transcriber, WhisperCli, WhisperCliOpts, transcribe_video};
