use super::*;
use crate::animation::ease::Ease;
use crate::caption::group::group_words;
use crate::style::spec::ZoomSpec;

fn chunk(words: &[(&str, f64, f64)]) -> Chunk {
    let ws: Vec<Word> = words.iter().map(|&(t, s, e)| Word::new(t, s, e)).collect();
    group_words(&ws, ws.len().max(1)).unwrap().remove(0)
}

fn spec() -> StyleSpec {
    StyleSpec {
        transition: true,
        highlight: true,
        ..StyleSpec::default()
    }
}

#[test]
fn hi_there_scenario() {
    let c = chunk(&[("hi", 0.0, 0.5), ("there", 0.5, 1.2)]);
    let s = spec();

    let a = render_state(0.05, &c, 0, &s);
    assert_eq!(a.phase, WordPhase::Ramping);
    assert!(a.scale > 0.8 && a.scale < 1.0, "{}", a.scale);

    let b = render_state(0.3, &c, 0, &s);
    assert_eq!(b.phase, WordPhase::Steady);
    assert_eq!(b.scale, 1.0);

    assert!(!render_state(0.5, &c, 0, &s).is_active());
    let there = render_state(0.5, &c, 1, &s);
    assert_eq!(there.phase, WordPhase::Ramping);
    assert_eq!(there.scale, 0.8);
    assert!(there.is_highlighted);
}

#[test]
fn start_is_active_and_end_is_not() {
    let c = chunk(&[("a", 1.0, 2.0)]);
    let s = spec();
    assert!(render_state(1.0, &c, 0, &s).is_active());
    assert!(!render_state(2.0, &c, 0, &s).is_active());
    assert!(!render_state(0.999, &c, 0, &s).is_active());
}

#[test]
fn highlight_is_exclusive_even_with_overlaps() {
    let c = chunk(&[("a", 0.0, 1.0), ("b", 0.5, 1.5), ("c", 0.7, 0.9), ("d", 2.0, 3.0)]);
    let s = spec();
    let mut t = 0.0;
    while t < 3.5 {
        let lit = (0..c.words.len())
            .filter(|&i| render_state(t, &c, i, &s).is_highlighted)
            .count();
        assert!(lit <= 1, "t={t} lit={lit}");
        t += 0.01;
    }
    assert_eq!(highlighted_word(0.8, &c), Some(2));
    assert_eq!(highlighted_word(1.2, &c), Some(1));
}

#[test]
fn gap_inside_chunk_highlights_nothing() {
    let c = chunk(&[("a", 0.0, 1.0), ("b", 2.0, 3.0)]);
    let s = spec();
    assert_eq!(highlighted_word(1.5, &c), None);
    assert!((0..2).all(|i| !render_state(1.5, &c, i, &s).is_highlighted));
}

#[test]
fn highlight_disabled_never_highlights() {
    let c = chunk(&[("a", 0.0, 1.0)]);
    let s = StyleSpec {
        highlight: false,
        ..spec()
    };
    assert!(!render_state(0.5, &c, 0, &s).is_highlighted);
}

#[test]
fn transition_disabled_is_always_full_size() {
    let c = chunk(&[("a", 0.0, 1.0)]);
    let s = StyleSpec {
        transition: false,
        ..spec()
    };
    let st = render_state(0.0, &c, 0, &s);
    assert_eq!(st.phase, WordPhase::Steady);
    assert_eq!(st.scale, 1.0);
}

#[test]
fn zero_length_word_is_full_size_at_its_instant() {
    let c = chunk(&[("a", 1.0, 1.0)]);
    let s = spec();
    let st = render_state(1.0, &c, 0, &s);
    assert_eq!(st.phase, WordPhase::Steady);
    assert_eq!(st.scale, 1.0);
    assert!(!render_state(1.0001, &c, 0, &s).is_active());
}

#[test]
fn zero_ramp_fraction_skips_ramping() {
    let c = chunk(&[("a", 0.0, 1.0)]);
    let s = StyleSpec {
        zoom: ZoomSpec {
            ramp_fraction: 0.0,
            ..ZoomSpec::default()
        },
        ..spec()
    };
    assert_eq!(render_state(0.0, &c, 0, &s).phase, WordPhase::Steady);
}

#[test]
fn eased_ramp_is_monotonic_and_ends_at_one() {
    let c = chunk(&[("a", 0.0, 1.0)]);
    let s = StyleSpec {
        zoom: ZoomSpec {
            ramp_fraction: 0.5,
            start_scale: 0.5,
            ease: Ease::OutCubic,
        },
        ..spec()
    };
    let mut last = 0.0;
    for i in 0..50 {
        let st = render_state(i as f64 * 0.01, &c, 0, &s);
        assert_eq!(st.phase, WordPhase::Ramping);
        assert!(st.scale >= last);
        last = st.scale;
    }
    assert_eq!(render_state(0.5, &c, 0, &s).scale, 1.0);
}

#[test]
fn render_state_is_deterministic_and_order_free() {
    let c = chunk(&[("a", 0.0, 0.4), ("b", 0.4, 0.9)]);
    let s = spec();
    let forward: Vec<_> = (0..100).map(|i| render_state(i as f64 * 0.01, &c, 1, &s)).collect();
    let backward: Vec<_> = (0..100)
        .rev()
        .map(|i| render_state(i as f64 * 0.01, &c, 1, &s))
        .collect();
    let mut backward = backward;
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn out_of_range_word_is_inactive() {
    let c = chunk(&[("a", 0.0, 1.0)]);
    assert!(!render_state(0.5, &c, 3, &spec()).is_active());
}
