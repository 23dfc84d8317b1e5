use super::*;

#[test]
fn empty_object_is_the_default_style() {
    let s = StyleSpec::from_json_str("{}").unwrap();
    assert_eq!(s, StyleSpec::default());
    s.validate().unwrap();
    assert_eq!(s.zoom.ramp_fraction, 0.2);
    assert_eq!(s.zoom.start_scale, 0.8);
    assert_eq!(s.text_colors.colors().len(), 9);
}

#[test]
fn parses_documented_options() {
    let s = StyleSpec::from_json_str(
        r##"{
            "number_of_words": 2,
            "font": "fonts/Inter.ttf",
            "font_size": 72,
            "position": "bottom",
            "text_align": "left",
            "text_colors": ["red", "#00FF00"],
            "stroke_color": "white",
            "stroke_width": 0,
            "bg_color": "transparent",
            "transition": false,
            "highlight": true,
            "has_intro_sound": true,
            "overlay": "overlay.mp4",
            "color_cycle": "word",
            "display": "word",
            "zoom": {"ease": "out_cubic"},
            "chunk_overrides": {"1": {"color": "blue"}}
        }"##,
    )
    .unwrap();
    s.validate().unwrap();
    assert_eq!(s.number_of_words, 2);
    assert_eq!(s.position, Position::Bottom);
    assert_eq!(s.text_align, TextAlign::Left);
    assert_eq!(s.text_colors.colors(), &[Rgba8::rgb(255, 0, 0), Rgba8::rgb(0, 255, 0)]);
    assert!(s.bg_color.is_transparent());
    assert_eq!(s.zoom.ease, Ease::OutCubic);
    assert_eq!(s.zoom.ramp_fraction, 0.2);
    assert_eq!(s.chunk_overrides[&1].color, Some(Rgba8::rgb(0, 0, 255)));
    assert_eq!(s.overlay.as_deref(), Some("overlay.mp4"));
}

#[test]
fn empty_palette_is_rejected_at_parse_time() {
    let err = StyleSpec::from_json_str(r#"{"text_colors": []}"#).unwrap_err();
    assert!(matches!(err, CaptionError::InvalidConfiguration(_)));
    assert!(Palette::new(Vec::new()).is_err());
}

#[test]
fn palette_cycles() {
    let p = Palette::new(vec![Rgba8::rgb(1, 0, 0), Rgba8::rgb(2, 0, 0), Rgba8::rgb(3, 0, 0)])
        .unwrap();
    let got: Vec<u8> = (0..4).map(|i| p.cycle(i).r).collect();
    assert_eq!(got, [1, 2, 3, 1]);
}

#[test]
fn validate_rejects_bad_numbers() {
    let bad = [
        StyleSpec {
            number_of_words: 0,
            ..StyleSpec::default()
        },
        StyleSpec {
            font_size: 0,
            ..StyleSpec::default()
        },
        StyleSpec {
            zoom: ZoomSpec {
                ramp_fraction: -0.1,
                ..ZoomSpec::default()
            },
            ..StyleSpec::default()
        },
        StyleSpec {
            zoom: ZoomSpec {
                ramp_fraction: 1.5,
                ..ZoomSpec::default()
            },
            ..StyleSpec::default()
        },
        StyleSpec {
            zoom: ZoomSpec {
                start_scale: 0.0,
                ..ZoomSpec::default()
            },
            ..StyleSpec::default()
        },
        StyleSpec {
            line_spacing: f64::NAN,
            ..StyleSpec::default()
        },
        StyleSpec {
            overlay: Some(" ".to_owned()),
            ..StyleSpec::default()
        },
    ];
    for s in bad {
        let err = s.validate().unwrap_err();
        assert!(matches!(err, CaptionError::InvalidConfiguration(_)), "{s:?}");
    }
}

#[test]
fn ramp_fraction_bounds_are_inclusive() {
    for f in [0.0, 1.0] {
        let s = StyleSpec {
            zoom: ZoomSpec {
                ramp_fraction: f,
                ..ZoomSpec::default()
            },
            ..StyleSpec::default()
        };
        s.validate().unwrap();
    }
}

#[test]
fn negative_word_count_fails_to_parse() {
    assert!(StyleSpec::from_json_str(r#"{"number_of_words": -1}"#).is_err());
}
