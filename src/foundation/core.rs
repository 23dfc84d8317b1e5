use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::Rect;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based frame index on the output video timeline.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open range of frames `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame in the range.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> CaptionResult<Self> {
        if start.0 > end.0 {
            return Err(CaptionError::invalid_configuration(
                "FrameRange start must be <= end",
            ));
        }
        Ok(Self { start, end })
    }

    /// `true` when the range holds no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies in `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate the frames of the range in order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate (`num / den` frames per second).
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Last frame index that `f64` seconds still resolve one by one (2^53).
    pub const MAX_FRAME: u64 = 1 << 53;

    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> CaptionResult<Self> {
        if den == 0 {
            return Err(CaptionError::invalid_configuration("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CaptionError::invalid_configuration("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Presentation time of frame `frames` (its start instant).
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// Smallest frame index whose presentation time is `>= secs`.
    ///
    /// Saturates at [`Fps::MAX_FRAME`].
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        let approx = (secs * self.as_f64()).ceil();
        if approx >= Self::MAX_FRAME as f64 {
            return Self::MAX_FRAME;
        }
        let mut f = approx as u64;
        // Float rounding can land one frame off in either direction.
        if f > 0 && self.frames_to_secs(f - 1) >= secs {
            f -= 1;
        }
        if self.frames_to_secs(f) < secs {
            f += 1;
        }
        f
    }

    /// Frames whose presentation time falls inside `span`.
    pub fn frames_in_span(self, span: TimeSpan) -> FrameRange {
        let start = self.secs_to_frames_ceil(span.start);
        let end = self.secs_to_frames_ceil(span.end).max(start);
        FrameRange {
            start: FrameIndex(start),
            end: FrameIndex(end),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output frame dimensions in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject zero-sized canvases.
    pub fn validate(self) -> CaptionResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptionError::invalid_configuration(
                "canvas width/height must be > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Half-open time interval `[start, end)` in seconds.
pub struct TimeSpan {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl TimeSpan {
    /// Build a span without validation; callers validate at the boundary.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length in seconds (never negative).
    pub fn duration(self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// Half-open containment: `start <= t < end`.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// `true` when `start == end`.
    pub fn is_instant(self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
