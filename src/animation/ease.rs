/// Easing curves for time-based value interpolation on the rendering sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    #[default]
    InOutCubic,
}

impl Ease {
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

    /// Cubic-bezier control points approximating this curve (SMIL `keySplines` form).
    pub fn control_points(self) -> [f64; 4] {
        match self {
            Self::Linear => [0.0, 0.0, 1.0, 1.0],
            Self::InQuad => [0.55, 0.085, 0.68, 0.53],
            Self::OutQuad => [0.25, 0.46, 0.45, 0.94],
            Self::InOutQuad => [0.455, 0.03, 0.515, 0.955],
            Self::InCubic => [0.55, 0.055, 0.675, 0.19],
            Self::OutCubic => [0.215, 0.61, 0.355, 1.0],
            Self::InOutCubic => [0.645, 0.045, 0.355, 1.0],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
