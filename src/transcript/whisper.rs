use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;

use crate::encode::ffmpeg::extract_audio_wav;
use crate::foundation::error::{CaptionError, CaptionResult};
use crate::transcript::model::Transcript;

/// Speech-to-text seam. The engine only needs timestamped words back.
pub trait Transcriber {
    /// Transcribe an audio file into an ordered, validated word sequence.
    fn transcribe(&self, audio: &Path) -> CaptionResult<Transcript>;
}

/// Options for [`WhisperCli`].
#[derive(Clone, Debug)]
pub struct WhisperCliOpts {
    /// Executable to run (looked up on `PATH` when relative).
    pub program: PathBuf,
    /// Whisper model name (`tiny`, `base`, `small`, ...).
    pub model: String,
    /// Spoken language; `None` lets whisper detect it.
    pub language: Option<String>,
}

impl Default for WhisperCliOpts {
    fn default() -> Self {
        Self {
            program: PathBuf::from("whisper"),
            model: "base".to_owned(),
            language: Some("en".to_owned()),
        }
    }
}

/// Runs the `whisper` command line with word timestamps and reads back its JSON result.
#[derive(Clone, Debug, Default)]
pub struct WhisperCli {
    opts: WhisperCliOpts,
}

impl WhisperCli {
    /// Create a transcriber with the given options.
    pub fn new(opts: WhisperCliOpts) -> Self {
        Self { opts }
    }

    fn args(&self, audio: &Path, out_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            audio.into(),
            "--model".into(),
            self.opts.model.clone().into(),
            "--word_timestamps".into(),
            "True".into(),
            "--condition_on_previous_text".into(),
            "False".into(),
            "--output_format".into(),
            "json".into(),
            "--output_dir".into(),
            out_dir.into(),
        ];
        if let Some(lang) = &self.opts.language {
            args.push("--language".into());
            args.push(lang.clone().into());
        }
        args
    }
}

impl Transcriber for WhisperCli {
    #[tracing::instrument(skip(self), fields(model = %self.opts.model))]
    fn transcribe(&self, audio: &Path) -> CaptionResult<Transcript> {
        let out_dir = tempfile::tempdir().context("create whisper output directory")?;

        let out = Command::new(&self.opts.program)
            .args(self.args(audio, out_dir.path()))
            .output()
            .map_err(|e| {
                CaptionError::transcription(format!(
                    "failed to run '{}' (is it installed and on PATH?): {e}",
                    self.opts.program.display()
                ))
            })?;
        if !out.status.success() {
            return Err(CaptionError::transcription(format!(
                "whisper exited with status {}: {}",
                out.status,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let stem = audio
            .file_stem()
            .ok_or_else(|| CaptionError::transcription("audio path has no file name"))?;
        let json_path = out_dir
            .path()
            .join(format!("{}.json", stem.to_string_lossy()));
        let transcript = Transcript::from_path(&json_path)?;
        tracing::info!(words = transcript.len(), "transcription finished");
        Ok(transcript)
    }
}

/// Extract the audio track of `video` to a temporary WAV and transcribe it.
///
/// The temporary file is removed before returning.
pub fn transcribe_video(transcriber: &dyn Transcriber, video: &Path) -> CaptionResult<Transcript> {
    let dir = tempfile::tempdir().context("create temporary audio directory")?;
    let wav = dir.path().join("audio.wav");
    extract_audio_wav(video, &wav)?;
    transcriber.transcribe(&wav)
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/whisper.rs"]
mod tests;
