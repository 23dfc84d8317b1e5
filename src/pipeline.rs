use std::path::{Path, PathBuf};

use crate::compile::plan::{CaptionPlan, CompileOpts, compile_plan};
use crate::encode::compositor::{CompositeJob, Compositor};
use crate::encode::ffmpeg::probe_video;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::layout::measure::{FontMeasure, TextMeasure};
use crate::scene::model::CaptionScene;
use crate::style::spec::StyleSpec;
use crate::transcript::model::Transcript;
use crate::transcript::whisper::{Transcriber, transcribe_video};

/// Options for [`caption_video`].
#[derive(Clone, Debug)]
pub struct CaptionOpts {
    /// Source video.
    pub video: PathBuf,
    /// Output path; defaults to [`default_output_path`].
    pub out: Option<PathBuf>,
    /// Caption style.
    pub style: StyleSpec,
    /// Use this transcript JSON instead of running speech-to-text.
    pub transcript: Option<PathBuf>,
    /// Replace an existing output file.
    pub overwrite: bool,
    /// Override rayon worker threads for plan compilation.
    pub threads: Option<usize>,
}

impl CaptionOpts {
    /// Caption `video` with `style`, transcribing it and writing next to the source.
    pub fn new(video: impl Into<PathBuf>, style: StyleSpec) -> Self {
        Self {
            video: video.into(),
            out: None,
            style,
            transcript: None,
            overwrite: true,
            threads: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
/// Summary of a finished [`caption_video`] run.
pub struct CaptionReport {
    /// Written file.
    pub out: PathBuf,
    /// Transcribed words.
    pub words: usize,
    /// Caption chunks.
    pub chunks: usize,
    /// Render instructions handed to the compositor.
    pub instructions: usize,
}

/// `<dir>/<stem>_captioned.<ext>` next to `video` (`.mp4` when it has no extension).
pub fn default_output_path(video: &Path) -> PathBuf {
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_owned());
    let ext = video
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_owned());
    video.with_file_name(format!("{stem}_captioned.{ext}"))
}

/// Build a scene and compile it; the pure half of [`caption_video`].
pub fn plan_captions(
    transcript: &Transcript,
    style: StyleSpec,
    canvas: Canvas,
    fps: Fps,
    opts: CompileOpts,
    measure: &mut dyn TextMeasure,
) -> CaptionResult<(CaptionScene, CaptionPlan)> {
    let scene = CaptionScene::build(transcript, style, canvas, measure)?;
    let plan = compile_plan(&scene, fps, opts)?;
    Ok((scene, plan))
}

/// Caption one video end to end: probe, transcribe (or load a transcript), plan and composite.
///
/// The style is validated and its font loaded before any external process runs.
#[tracing::instrument(skip_all, fields(video = %opts.video.display()))]
pub fn caption_video(
    opts: CaptionOpts,
    transcriber: &dyn Transcriber,
    compositor: &mut dyn Compositor,
) -> CaptionResult<CaptionReport> {
    opts.style.validate()?;
    if !opts.video.is_file() {
        return Err(CaptionError::invalid_configuration(format!(
            "input video '{}' does not exist",
            opts.video.display()
        )));
    }
    let mut measure = FontMeasure::from_path(&opts.style.font)?;

    let info = probe_video(&opts.video)?;
    tracing::info!(
        width = info.width,
        height = info.height,
        fps = info.fps.as_f64(),
        duration = info.duration_sec,
        "probed source video"
    );

    let transcript = match &opts.transcript {
        Some(path) => Transcript::from_path(path)?,
        None => transcribe_video(transcriber, &opts.video)?,
    };

    let intro_sound = opts
        .style
        .has_intro_sound
        .then(|| PathBuf::from(&opts.style.intro_sound));
    let overlay = opts.style.overlay.as_ref().map(PathBuf::from);

    let (scene, plan) = plan_captions(
        &transcript,
        opts.style,
        info.canvas(),
        info.fps,
        CompileOpts {
            frame_limit: info.frame_count(),
            threads: opts.threads,
        },
        &mut measure,
    )?;

    let out = opts
        .out
        .unwrap_or_else(|| default_output_path(&opts.video));
    let job = CompositeJob {
        input_video: opts.video,
        output: out.clone(),
        overlay,
        intro_sound,
        source_has_audio: info.has_audio,
        overwrite: opts.overwrite,
    };
    compositor.composite(&job, &plan)?;

    Ok(CaptionReport {
        out,
        words: transcript.len(),
        chunks: scene.chunks().len(),
        instructions: plan.instructions.len(),
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
