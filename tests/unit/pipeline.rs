use super::*;
use crate::encode::compositor::InMemoryCompositor;
use crate::layout::measure::FixedAdvanceMeasure;

struct NeverCalled;

impl Transcriber for NeverCalled {
    fn transcribe(&self, _audio: &Path) -> CaptionResult<Transcript> {
        Err(CaptionError::transcription("unexpected transcription"))
    }
}

#[test]
fn default_output_sits_next_to_the_source() {
    assert_eq!(
        default_output_path(Path::new("clips/talk.final.mov")),
        PathBuf::from("clips/talk.final_captioned.mov")
    );
    assert_eq!(
        default_output_path(Path::new("raw")),
        PathBuf::from("raw_captioned.mp4")
    );
}

#[test]
fn plan_captions_builds_scene_and_plan() {
    let transcript = Transcript::from_triples([("hi", 0.0, 0.5), ("there", 0.5, 1.2)]).unwrap();
    let (scene, plan) = plan_captions(
        &transcript,
        StyleSpec::default(),
        Canvas {
            width: 1280,
            height: 720,
        },
        Fps::new(30, 1).unwrap(),
        CompileOpts::default(),
        &mut FixedAdvanceMeasure::default(),
    )
    .unwrap();
    assert_eq!(scene.chunks().len(), 1);
    assert_eq!(plan.styles.len(), 1);
    assert!(!plan.is_empty());
}

#[test]
fn invalid_style_fails_before_touching_the_video() {
    let style = StyleSpec {
        number_of_words: 0,
        ..StyleSpec::default()
    };
    let mut compositor = InMemoryCompositor::new();
    let err = caption_video(
        CaptionOpts::new("does-not-exist.mp4", style),
        &NeverCalled,
        &mut compositor,
    )
    .unwrap_err();
    assert!(matches!(err, CaptionError::InvalidConfiguration(_)));
    assert!(compositor.jobs().is_empty());
}

struct PanicsIfCalled;

impl Transcriber for PanicsIfCalled {
    fn transcribe(&self, _audio: &Path) -> CaptionResult<Transcript> {
        panic!("transcription must not start when the font is missing")
    }
}

#[test]
fn missing_font_fails_before_probe_and_transcription() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"not really a video").unwrap();
    let style = StyleSpec {
        font: dir.path().join("missing.ttf").to_string_lossy().into_owned(),
        ..StyleSpec::default()
    };

    let mut compositor = InMemoryCompositor::new();
    let err = caption_video(CaptionOpts::new(&video, style), &PanicsIfCalled, &mut compositor)
        .unwrap_err();
    assert!(matches!(err, CaptionError::InvalidConfiguration(ref m) if m.contains("missing.ttf")));
    assert!(compositor.jobs().is_empty());
}

#[test]
fn missing_video_is_rejected() {
    let mut compositor = InMemoryCompositor::new();
    let err = caption_video(
        CaptionOpts::new("does-not-exist.mp4", StyleSpec::default()),
        &NeverCalled,
        &mut compositor,
    )
    .unwrap_err();
    assert!(matches!(err, CaptionError::InvalidConfiguration(_)));
}
