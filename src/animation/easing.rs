//! Easing curves applied to linear animation progress.

/// An easing curve mapping linear time `t` in `[0, 1]` to eased progress.
///
/// Every curve is monotonic and maps `0 -> 0` and `1 -> 1` exactly, so an
/// animation driven by it settles on its final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Fast start, gentle landing. Used for row reveals and drag settle.
    #[default]
    EaseOutCubic,
    EaseInOutQuad,
}

impl Easing {
    /// Apply the curve. Input outside `[0, 1]` is clamped first.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let k = -2.0 * t + 2.0;
                    1.0 - k * k / 2.0
                }
            }
        }
    }

    /// Parse a curve name as used in configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Easing::Linear),
            "ease-out" | "ease-out-cubic" => Some(Easing::EaseOutCubic),
            "ease-in-out" | "ease-in-out-quad" => Some(Easing::EaseInOutQuad),
            _ => None,
        }
    }
}
