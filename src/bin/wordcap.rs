use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wordcap", version, about = "Burn animated word-level captions into videos")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Transcribe and caption a video (requires `ffmpeg` and `whisper` on PATH).
    Caption(CaptionArgs),
    /// Transcribe a video to a word-timestamp JSON file.
    Transcribe(TranscribeArgs),
    /// Compile a caption plan from a transcript without touching any video.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct WhisperArgs {
    /// Whisper model name.
    #[arg(long, default_value = "base")]
    model: String,

    /// Spoken language; pass an empty string to auto-detect.
    #[arg(long, default_value = "en")]
    language: String,

    /// Whisper executable.
    #[arg(long, default_value = "whisper")]
    whisper: PathBuf,
}

impl WhisperArgs {
    fn transcriber(&self) -> wordcap::WhisperCli {
        wordcap::WhisperCli::new(wordcap::WhisperCliOpts {
            program: self.whisper.clone(),
            model: self.model.clone(),
            language: (!self.language.is_empty()).then(|| self.language.clone()),
        })
    }
}

#[derive(Parser, Debug)]
struct CaptionArgs {
    /// Input video.
    #[arg(long)]
    video: PathBuf,

    /// Output video (defaults to `<stem>_captioned.<ext>` next to the input).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Style JSON; built-in defaults when omitted.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Use an existing transcript JSON instead of running whisper.
    #[arg(long)]
    transcript: Option<PathBuf>,

    #[command(flatten)]
    whisper: WhisperArgs,

    /// Fail instead of replacing an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Override rayon worker threads for plan compilation.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct TranscribeArgs {
    /// Input video.
    #[arg(long)]
    video: PathBuf,

    /// Output transcript JSON.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    whisper: WhisperArgs,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Transcript JSON.
    #[arg(long)]
    transcript: PathBuf,

    /// Style JSON; built-in defaults when omitted.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Stop sampling at this many seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Measure text with fixed per-character advances instead of the style font.
    #[arg(long, default_value_t = false)]
    approx_metrics: bool,

    /// Output plan JSON.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Caption(args) => cmd_caption(args),
        Command::Transcribe(args) => cmd_transcribe(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "wordcap=debug" } else { "wordcap=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_style(path: Option<&Path>) -> anyhow::Result<wordcap::StyleSpec> {
    let style = match path {
        Some(p) => wordcap::StyleSpec::from_path(p)?,
        None => wordcap::StyleSpec::default(),
    };
    style.validate()?;
    Ok(style)
}

fn cmd_caption(args: CaptionArgs) -> anyhow::Result<()> {
    let style = load_style(args.style.as_deref())?;
    let opts = wordcap::CaptionOpts {
        video: args.video,
        out: args.out,
        style,
        transcript: args.transcript,
        overwrite: !args.no_overwrite,
        threads: args.threads,
    };
    let transcriber = args.whisper.transcriber();
    let mut compositor = wordcap::FfmpegCompositor::new();
    let report = wordcap::caption_video(opts, &transcriber, &mut compositor)?;

    eprintln!(
        "wrote {} ({} words, {} chunks, {} instructions)",
        report.out.display(),
        report.words,
        report.chunks,
        report.instructions
    );
    Ok(())
}

fn cmd_transcribe(args: TranscribeArgs) -> anyhow::Result<()> {
    let transcript = wordcap::transcribe_video(&args.whisper.transcriber(), &args.video)?;
    wordcap::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, transcript.to_json_string()?)
        .with_context(|| format!("write transcript '{}'", args.out.display()))?;
    eprintln!("wrote {} ({} words)", args.out.display(), transcript.len());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let transcript = wordcap::Transcript::from_path(&args.transcript)?;
    let style = load_style(args.style.as_deref())?;
    let fps = wordcap::Fps::new(args.fps, 1)?;
    let canvas = wordcap::Canvas {
        width: args.width,
        height: args.height,
    };
    let frame_limit = match args.duration {
        Some(d) if !d.is_finite() || d < 0.0 => {
            anyhow::bail!("--duration must be a finite, non-negative number of seconds")
        }
        Some(d) => Some(fps.secs_to_frames_ceil(d)),
        None => None,
    };

    let mut measure: Box<dyn wordcap::TextMeasure> = if args.approx_metrics {
        Box::new(wordcap::FixedAdvanceMeasure::default())
    } else {
        match wordcap::FontMeasure::from_path(&style.font) {
            Ok(m) => Box::new(m),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to approximate text metrics");
                Box::new(wordcap::FixedAdvanceMeasure::default())
            }
        }
    };

    let (_, plan) = wordcap::plan_captions(
        &transcript,
        style,
        canvas,
        fps,
        wordcap::CompileOpts {
            frame_limit,
            threads: None,
        },
        measure.as_mut(),
    )?;

    wordcap::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, plan.to_json_string()?)
        .with_context(|| format!("write plan '{}'", args.out.display()))?;
    eprintln!(
        "wrote {} ({} instructions)",
        args.out.display(),
        plan.instructions.len()
    );
    Ok(())
}
