use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.iter().count(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
}

#[test]
fn fps_ceil_hits_exact_frame_times() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(0.0), 0);
    assert_eq!(fps.secs_to_frames_ceil(0.5), 15);
    assert_eq!(fps.secs_to_frames_ceil(0.51), 16);

    let ntsc = Fps::new(30000, 1001).unwrap();
    for f in [1u64, 7, 100, 1234] {
        assert_eq!(ntsc.secs_to_frames_ceil(ntsc.frames_to_secs(f)), f);
    }
}

#[test]
fn fps_ceil_saturates_on_huge_times() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_ceil(1e19), Fps::MAX_FRAME);
    assert_eq!(fps.secs_to_frames_ceil(f64::MAX), Fps::MAX_FRAME);

    let r = fps.frames_in_span(TimeSpan::new(1.0, 1e19));
    assert_eq!(r.start, FrameIndex(30));
    assert_eq!(r.end, FrameIndex(Fps::MAX_FRAME));
}

#[test]
fn frames_in_span_is_half_open() {
    let fps = Fps::new(10, 1).unwrap();
    let r = fps.frames_in_span(TimeSpan::new(0.0, 0.5));
    assert_eq!(r.start, FrameIndex(0));
    assert_eq!(r.end, FrameIndex(5));

    let r = fps.frames_in_span(TimeSpan::new(0.05, 0.15));
    assert_eq!((r.start, r.end), (FrameIndex(1), FrameIndex(2)));

    let r = fps.frames_in_span(TimeSpan::new(0.31, 0.32));
    assert!(r.is_empty());
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn time_span_contains_is_half_open() {
    let s = TimeSpan::new(1.0, 2.0);
    assert!(s.contains(1.0));
    assert!(s.contains(1.999));
    assert!(!s.contains(2.0));
    assert!(!s.contains(0.999));
    assert_eq!(s.duration(), 1.0);
    assert!(TimeSpan::new(3.0, 3.0).is_instant());
}

#[test]
fn canvas_rejects_zero_sizes() {
    assert!(Canvas { width: 0, height: 10 }.validate().is_err());
    assert!(Canvas { width: 10, height: 10 }.validate().is_ok());
}
