//! Authoring presets for common sprite setups
//!
//! Initial states and timeline fragments that recur across scene
//! definitions: full-screen backgrounds, centred title cards, fade-in/hold/
//! fade-out sequences and pulsing.

use reel_core::{Color, Vec2, VisualState};

use crate::easing::Easing;
use crate::keyframe::{RepeatCount, RepeatMode};
use crate::timeline::Timeline;

/// Top-left position that centres a sprite of `size` on a screen of `screen`
pub fn screen_center_position(size: Vec2, screen: Vec2) -> Vec2 {
    (screen - size) * 0.5
}

/// Pre-built initial states and timeline fragments
pub struct Presets;

impl Presets {
    // ========================================================================
    // Initial states
    // ========================================================================

    /// Background sprite at the origin tinted with `color`
    pub fn background(color: Color) -> VisualState {
        VisualState::default().with_color(color)
    }

    /// Sprite of `size` centred on `screen`
    pub fn centered(size: Vec2, screen: Vec2, color: Color) -> VisualState {
        VisualState::at(screen_center_position(size, screen)).with_color(color)
    }

    // ========================================================================
    // Timeline fragments
    // ========================================================================

    /// Title-card pattern: wait, fade in, hold, fade out
    pub fn title_card(
        timeline: &mut Timeline,
        lead_in: f64,
        fade_in: f64,
        hold: f64,
        fade_out: f64,
        easing: Easing,
    ) -> &mut Timeline {
        timeline
            .delay(lead_in)
            .fade_to_with_ease(1.0, fade_in, easing)
            .delay(hold)
            .fade_to_with_ease(0.0, fade_out, easing)
    }

    /// Ping-pong scale between the current scale and `scale`
    pub fn pulse(
        timeline: &mut Timeline,
        scale: Vec2,
        half_period: f64,
        count: RepeatCount,
    ) -> &mut Timeline {
        timeline
            .begin_repeat(RepeatMode::PingPong, count)
            .scale_to_with_ease(scale, half_period, Easing::EaseInOut)
            .end_repeat()
    }
}
