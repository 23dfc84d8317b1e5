use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::compile::plan::CaptionPlan;
use crate::encode::compositor::{CompositeJob, Compositor};
use crate::encode::drawtext::{AudioMap, FilterGraph, FilterInputs, build_filter_graph};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{CaptionError, CaptionResult};

/// Returns `true` when an `ffmpeg` executable is available on `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` when missing.
pub fn ensure_parent_dir(path: &Path) -> CaptionResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
/// What `ffprobe` reports about a source video.
pub struct VideoInfo {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Native frame rate.
    pub fps: Fps,
    /// Container duration in seconds (0 when unknown).
    pub duration_sec: f64,
    /// Whether any audio stream exists.
    pub has_audio: bool,
}

impl VideoInfo {
    /// Output canvas matching the source.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Number of frames to sample, or `None` when the duration is unknown.
    pub fn frame_count(&self) -> Option<u64> {
        (self.duration_sec > 0.0).then(|| self.fps.secs_to_frames_ceil(self.duration_sec))
    }
}

/// Probe `source_path` with `ffprobe`.
#[tracing::instrument]
pub fn probe_video(source_path: &Path) -> CaptionResult<VideoInfo> {
    let out = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| {
            CaptionError::composite(format!(
                "failed to run ffprobe (is it installed and on PATH?): {e}"
            ))
        })?;
    if !out.status.success() {
        return Err(CaptionError::composite(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    parse_probe_json(&out.stdout)
}

pub(crate) fn parse_probe_json(json: &[u8]) -> CaptionResult<VideoInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        width: Option<u32>,
        height: Option<u32>,
        r_frame_rate: Option<String>,
        avg_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| CaptionError::composite(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| CaptionError::composite("no video stream found"))?;
    let width = video
        .width
        .ok_or_else(|| CaptionError::composite("missing video width from ffprobe"))?;
    let height = video
        .height
        .ok_or_else(|| CaptionError::composite("missing video height from ffprobe"))?;
    let (num, den) = [&video.r_frame_rate, &video.avg_frame_rate]
        .into_iter()
        .filter_map(|r| r.as_deref().and_then(parse_ff_ratio))
        .next()
        .ok_or_else(|| CaptionError::composite("invalid video frame rate"))?;
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0);
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoInfo {
        width,
        height,
        fps: Fps::new(num, den)?,
        duration_sec,
        has_audio,
    })
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let (a, b) = s.split_once('/')?;
    let a = a.parse::<u32>().ok()?;
    let b = b.parse::<u32>().ok()?;
    if a == 0 || b == 0 {
        return None;
    }
    Some((a, b))
}

/// Extract the first audio track of `video` as 16 kHz mono PCM WAV, the input whisper expects.
#[tracing::instrument]
pub fn extract_audio_wav(video: &Path, wav: &Path) -> CaptionResult<()> {
    let out = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error", "-i"])
        .arg(video)
        .args(["-vn", "-ac", "1", "-ar", "16000", "-c:a", "pcm_s16le"])
        .arg(wav)
        .output()
        .map_err(|e| {
            CaptionError::transcription(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
    if !out.status.success() {
        return Err(CaptionError::transcription(format!(
            "audio extraction from '{}' failed: {}",
            video.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(())
}

/// Burns captions with the system `ffmpeg` binary and its `drawtext` filter.
#[derive(Clone, Debug)]
pub struct FfmpegCompositor {
    program: PathBuf,
}

impl Default for FfmpegCompositor {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }
}

impl FfmpegCompositor {
    /// Use the `ffmpeg` found on `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    fn args(job: &CompositeJob, graph: &FilterGraph, script: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            (if job.overwrite { "-y" } else { "-n" }).into(),
            "-loglevel".into(),
            "error".into(),
            "-i".into(),
            job.input_video.clone().into(),
        ];
        if let Some(overlay) = &job.overlay {
            args.extend(["-stream_loop", "-1", "-i"].map(OsString::from));
            args.push(overlay.clone().into());
        }
        if let Some(sound) = &job.intro_sound {
            args.push("-i".into());
            args.push(sound.clone().into());
        }
        args.push("-filter_complex_script".into());
        args.push(script.into());
        args.push("-map".into());
        args.push(graph.video_label.clone().into());
        let mut shortest = false;
        match &graph.audio {
            AudioMap::Filtered {
                label,
                needs_shortest,
            } => {
                args.push("-map".into());
                args.push(label.clone().into());
                args.extend(["-c:a", "aac"].map(OsString::from));
                shortest = *needs_shortest;
            }
            AudioMap::Source => {
                args.extend(["-map", "0:a", "-c:a", "aac"].map(OsString::from));
            }
            AudioMap::Silent => args.push("-an".into()),
        }
        for a in [
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ] {
            args.push(a.into());
        }
        if shortest {
            args.push("-shortest".into());
        }
        args.push(job.output.clone().into());
        args
    }
}

impl Compositor for FfmpegCompositor {
    #[tracing::instrument(skip_all, fields(output = %job.output.display(), instructions = plan.instructions.len()))]
    fn composite(&mut self, job: &CompositeJob, plan: &CaptionPlan) -> CaptionResult<()> {
        if job.output == job.input_video {
            return Err(CaptionError::invalid_configuration(
                "output path must differ from the input video",
            ));
        }
        if !job.overwrite && job.output.exists() {
            return Err(CaptionError::invalid_configuration(format!(
                "output file '{}' already exists",
                job.output.display()
            )));
        }
        ensure_parent_dir(&job.output)?;

        let graph = build_filter_graph(
            plan,
            FilterInputs {
                overlay: job.overlay.is_some(),
                intro_sound: job.intro_sound.is_some(),
                source_has_audio: job.source_has_audio,
            },
        );
        let mut script = tempfile::NamedTempFile::new().context("create filter script file")?;
        {
            use std::io::Write as _;
            script
                .write_all(graph.script.as_bytes())
                .context("write filter script")?;
            script.flush().context("flush filter script")?;
        }
        tracing::debug!(bytes = graph.script.len(), "filter script written");

        let out = Command::new(&self.program)
            .args(Self::args(job, &graph, script.path()))
            .stdout(Stdio::null())
            .output()
            .map_err(|e| {
                CaptionError::composite(format!(
                    "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
                ))
            })?;
        if !out.status.success() {
            return Err(CaptionError::composite(format!(
                "ffmpeg exited with status {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        tracing::info!("captioned video written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
