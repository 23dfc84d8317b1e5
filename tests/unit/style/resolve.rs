use super::*;
use crate::style::spec::{Palette, StyleOverride};

fn rgb(r: u8) -> Rgba8 {
    Rgba8::rgb(r, 0, 0)
}

fn spec3() -> StyleSpec {
    StyleSpec {
        text_colors: Palette::new(vec![rgb(10), rgb(20), rgb(30)]).unwrap(),
        ..StyleSpec::default()
    }
}

#[test]
fn chunk_colors_cycle_through_palette() {
    let spec = spec3();
    let got: Vec<_> = (0..4).map(|i| resolve(i, &spec).color).collect();
    assert_eq!(got, [rgb(10), rgb(20), rgb(30), rgb(10)]);
}

#[test]
fn resolve_is_deterministic() {
    let spec = spec3();
    for i in 0..5 {
        assert_eq!(resolve(i, &spec), resolve(i, &spec));
    }
}

#[test]
fn global_fields_are_copied() {
    let spec = StyleSpec {
        font: "fonts/X.ttf".to_owned(),
        stroke_width: 3,
        position: Position::Top,
        ..spec3()
    };
    let r = resolve(7, &spec);
    assert_eq!(r.font, "fonts/X.ttf");
    assert_eq!(r.stroke_width, 3);
    assert_eq!(r.position, Position::Top);
    assert_eq!(r.font_size, spec.font_size);
    assert_eq!(r.chunk_index, 7);
}

#[test]
fn overrides_apply_only_to_their_chunk() {
    let mut spec = spec3();
    spec.chunk_overrides.insert(
        1,
        StyleOverride {
            color: Some(rgb(99)),
            position: Some(Position::Bottom),
            font_size: Some(40),
        },
    );
    let r1 = resolve(1, &spec);
    assert_eq!(r1.color, rgb(99));
    assert_eq!(r1.position, Position::Bottom);
    assert_eq!(r1.font_size, 40);

    let r2 = resolve(2, &spec);
    assert_eq!(r2.color, rgb(30));
    assert_eq!(r2.position, spec.position);
}

#[test]
fn word_cycle_uses_global_word_index() {
    let spec = StyleSpec {
        color_cycle: ColorCycle::Word,
        ..spec3()
    };
    let chunk = resolve(0, &spec);
    let got: Vec<_> = (0..4)
        .map(|w| resolve_word_color(&chunk, w, &spec))
        .collect();
    assert_eq!(got, [rgb(10), rgb(20), rgb(30), rgb(10)]);
}

#[test]
fn chunk_cycle_shares_chunk_color_across_words() {
    let spec = spec3();
    let chunk = resolve(1, &spec);
    assert_eq!(resolve_word_color(&chunk, 0, &spec), rgb(20));
    assert_eq!(resolve_word_color(&chunk, 5, &spec), rgb(20));
}
