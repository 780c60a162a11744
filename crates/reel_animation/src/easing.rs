//! Easing functions for animations

use serde::{Deserialize, Serialize};

/// Period of the elastic oscillation
const ELASTIC_PERIOD: f32 = 0.3;
/// Overshoot amount of the back curve
const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Bounce,
    Elastic,
    Back,
}

impl Easing {
    /// Apply the easing function to a progress value.
    ///
    /// The input is clamped to 0.0..=1.0; the output is not. `Back` dips
    /// below zero and `Elastic` overshoots past one, and interpolation is
    /// expected to carry that through.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::Bounce => bounce(t),
            Easing::Elastic => elastic(t),
            Easing::Back => BACK_C3 * t * t * t - BACK_C1 * t * t,
        }
    }

    /// Look up an easing by name.
    ///
    /// Case and separators (`_`, `-`, spaces) are ignored. Unknown names fall
    /// back to `Linear`.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "easein" | "in" => Easing::EaseIn,
            "easeout" | "out" => Easing::EaseOut,
            "easeinout" | "inout" => Easing::EaseInOut,
            "bounce" => Easing::Bounce,
            "elastic" => Easing::Elastic,
            "back" => Easing::Back,
            _ => Easing::Linear,
        }
    }
}

impl From<&str> for Easing {
    fn from(name: &str) -> Self {
        Easing::from_name(name)
    }
}

/// Four-segment piecewise quadratic bounce
fn bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Exponentially decayed sine, exact at both endpoints
fn elastic(t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let s = ELASTIC_PERIOD / 4.0;
    2.0_f32.powf(-10.0 * t) * ((t - s) * std::f32::consts::TAU / ELASTIC_PERIOD).sin() + 1.0
}
