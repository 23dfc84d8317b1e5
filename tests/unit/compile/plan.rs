use super::*;
use crate::eval::evaluator::Evaluator;
use crate::layout::measure::FixedAdvanceMeasure;
use crate::style::spec::{Palette, StyleSpec};
use crate::transcript::model::Transcript;

const CANVAS: Canvas = Canvas {
    width: 640,
    height: 360,
};

fn fps10() -> Fps {
    Fps::new(10, 1).unwrap()
}

fn scene(triples: &[(&str, f64, f64)], spec: StyleSpec) -> CaptionScene {
    let transcript = Transcript::from_triples(triples.iter().copied()).unwrap();
    CaptionScene::build(&transcript, spec, CANVAS, &mut FixedAdvanceMeasure::default()).unwrap()
}

fn still() -> StyleSpec {
    StyleSpec {
        transition: false,
        text_colors: Palette::new(vec![Rgba8::rgb(10, 20, 30)]).unwrap(),
        ..StyleSpec::default()
    }
}

#[test]
fn steady_word_is_one_instruction() {
    let s = scene(&[("a", 0.0, 1.0)], still());
    let plan = compile_plan(&s, fps10(), CompileOpts::default()).unwrap();
    assert_eq!(plan.instructions.len(), 1);
    let i = &plan.instructions[0];
    assert_eq!(i.interval, TimeSpan::new(0.0, 1.0));
    assert_eq!(i.text, "a");
    assert_eq!(i.scale, 1.0);
    assert_eq!(i.font_size_px, 100.0);
    assert_eq!(plan.style_for(i).map(|s| s.chunk_index), Some(0));
}

#[test]
fn ramp_frames_get_their_own_instructions() {
    let spec = StyleSpec {
        transition: true,
        ..still()
    };
    let s = scene(&[("a", 0.0, 1.0)], spec);
    let plan = compile_plan(&s, fps10(), CompileOpts::default()).unwrap();
    let scales: Vec<f64> = plan.instructions.iter().map(|i| i.scale).collect();
    assert_eq!(scales.len(), 3);
    assert_eq!(scales[0], 0.8);
    assert!((scales[1] - 0.9).abs() < 1e-9);
    assert_eq!(scales[2], 1.0);
    assert_eq!(plan.instructions[2].interval, TimeSpan::new(0.2, 1.0));
}

#[test]
fn highlight_changes_split_instructions() {
    let spec = StyleSpec {
        highlight: true,
        number_of_words: 2,
        ..still()
    };
    let s = scene(&[("a", 0.0, 0.5), ("b", 1.0, 1.5)], spec);
    let plan = compile_plan(&s, fps10(), CompileOpts::default()).unwrap();
    let got: Vec<(&str, f64, f64, bool)> = plan
        .instructions
        .iter()
        .map(|i| (i.text.as_str(), i.interval.start, i.interval.end, i.is_highlighted))
        .collect();
    assert_eq!(
        got,
        [
            ("a", 0.0, 0.5, true),
            ("b", 0.0, 1.0, false),
            ("a", 0.5, 1.5, false),
            ("b", 1.0, 1.5, true),
        ]
    );
    assert_eq!(plan.active_at(1.2).count(), 2);
}

#[test]
fn frame_limit_truncates_intervals() {
    let s = scene(&[("a", 0.0, 1.0)], still());
    let opts = CompileOpts {
        frame_limit: Some(5),
        ..CompileOpts::default()
    };
    let plan = compile_plan(&s, fps10(), opts).unwrap();
    assert_eq!(plan.instructions[0].interval, TimeSpan::new(0.0, 0.5));

    let opts = CompileOpts {
        frame_limit: Some(0),
        ..CompileOpts::default()
    };
    assert!(compile_plan(&s, fps10(), opts).unwrap().is_empty());
}

#[test]
fn zero_length_word_lands_on_its_frame() {
    let s = scene(&[("pop", 0.5, 0.5)], still());
    let plan = compile_plan(&s, fps10(), CompileOpts::default()).unwrap();
    assert_eq!(plan.instructions.len(), 1);
    assert_eq!(plan.instructions[0].interval, TimeSpan::new(0.5, 0.6));
}

#[test]
fn overlapping_word_keeps_its_chunk_on_screen() {
    let spec = StyleSpec {
        number_of_words: 2,
        ..still()
    };
    let s = scene(&[("a", 0.0, 2.0), ("b", 0.5, 1.0)], spec);
    let fps = Fps::new(30, 1).unwrap();
    let plan = compile_plan(&s, fps, CompileOpts::default()).unwrap();

    for t in [0.6, 1.5, 1.9] {
        let drawn = Evaluator::eval_time(&s, t).words.len();
        assert_eq!(drawn, 2);
        assert_eq!(plan.active_at(t).count(), drawn, "t = {t}");
    }
    let a_end = plan
        .instructions
        .iter()
        .filter(|i| i.word_index == 0)
        .map(|i| i.interval.end)
        .fold(0.0, f64::max);
    assert!((a_end - 2.0).abs() < 1e-9);
    assert_eq!(plan.active_at(2.0).count(), 0);
}

#[test]
fn far_future_word_past_the_frame_limit_is_cut() {
    let spec = StyleSpec {
        number_of_words: 1,
        ..still()
    };
    let s = scene(&[("a", 0.0, 1.0), ("b", 900_000.0, 900_000.0)], spec);
    let opts = CompileOpts {
        frame_limit: Some(60),
        ..CompileOpts::default()
    };
    let plan = compile_plan(&s, fps10(), opts).unwrap();
    assert_eq!(plan.instructions.len(), 1);
    assert_eq!(plan.instructions[0].text, "a");
    assert_eq!(plan.styles.len(), 2);
}

#[test]
fn empty_scene_compiles_to_empty_plan() {
    let s = scene(&[], still());
    let plan = compile_plan(&s, fps10(), CompileOpts::default()).unwrap();
    assert!(plan.is_empty());
    assert!(plan.styles.is_empty());
}

#[test]
fn thread_count_does_not_change_the_plan() {
    let words: Vec<(String, f64, f64)> = (0..40)
        .map(|i| (format!("w{i}"), f64::from(i) * 0.3, f64::from(i) * 0.3 + 0.25))
        .collect();
    let transcript = Transcript::from_triples(words).unwrap();
    let spec = StyleSpec {
        highlight: true,
        ..StyleSpec::default()
    };
    let s = CaptionScene::build(&transcript, spec, CANVAS, &mut FixedAdvanceMeasure::default())
        .unwrap();
    let one = compile_plan(&s, fps10(), CompileOpts { threads: Some(1), ..Default::default() }).unwrap();
    let four = compile_plan(&s, fps10(), CompileOpts { threads: Some(4), ..Default::default() }).unwrap();
    assert_eq!(one.instructions, four.instructions);
}

#[test]
fn zero_threads_is_rejected() {
    let s = scene(&[("a", 0.0, 1.0)], still());
    let err = compile_plan(&s, fps10(), CompileOpts { threads: Some(0), ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, CaptionError::InvalidConfiguration(_)));
}
