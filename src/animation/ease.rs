/// Easing curve applied to the zoom-in ramp progress.
///
/// Every curve maps `0 -> 0` and `1 -> 1` and is monotonic in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant-speed ramp.
    #[default]
    Linear,
    /// Quadratic, slow start.
    InQuad,
    /// Quadratic, slow finish.
    OutQuad,
    /// Quadratic, slow start and finish.
    InOutQuad,
    /// Cubic, slow start.
    InCubic,
    /// Cubic, slow finish.
    OutCubic,
    /// Cubic, slow start and finish.
    InOutCubic,
}

impl Ease {
    /// Map ramp progress `t` (clamped to `[0, 1]`) through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }

    /// Eased interpolation from `from` to `to`.
    pub fn interpolate(self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.apply(t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
