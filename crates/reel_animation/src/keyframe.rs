//! Keyframes and keyframe groups
//!
//! A keyframe is one timed transition of a single sprite property toward a
//! target value. Keyframes are stored flattened in a [`Timeline`] with an
//! absolute start time resolved while recording; groups only remember what
//! evaluation needs to remap time (repeat groups) or what is useful when
//! inspecting a timeline (parallel groups).
//!
//! [`Timeline`]: crate::timeline::Timeline

use reel_core::{Color, Lerp, ShaderKind, Vec2, VisualState};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::easing::Easing;

/// The sprite property a keyframe drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    Scale,
    Rotation,
    Alpha,
    Color,
    Flip,
    ShaderSelect,
}

/// Target value of a keyframe, typed per property
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyframeTarget {
    Position(Vec2),
    Scale(Vec2),
    /// Radians
    Rotation(f32),
    Alpha(f32),
    Color(Color),
    /// Toggle vertical flip
    Flip,
    Shader(ShaderKind),
}

impl KeyframeTarget {
    pub fn property(&self) -> Property {
        match self {
            KeyframeTarget::Position(_) => Property::Position,
            KeyframeTarget::Scale(_) => Property::Scale,
            KeyframeTarget::Rotation(_) => Property::Rotation,
            KeyframeTarget::Alpha(_) => Property::Alpha,
            KeyframeTarget::Color(_) => Property::Color,
            KeyframeTarget::Flip => Property::Flip,
            KeyframeTarget::Shader(_) => Property::ShaderSelect,
        }
    }

    /// Whether the target switches instantly rather than interpolating
    pub fn is_instant(&self) -> bool {
        matches!(self, KeyframeTarget::Flip | KeyframeTarget::Shader(_))
    }
}

/// A single recorded transition
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    pub target: KeyframeTarget,
    /// Seconds; zero snaps to the target
    pub duration: f64,
    pub easing: Easing,
    /// Seconds from the owning timeline's origin
    pub start_time: f64,
    /// Index of the repeat group this keyframe was recorded in
    pub repeat_group: Option<usize>,
}

impl Keyframe {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Linear progress at `time`, capped at 1.0
    pub fn progress(&self, time: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((time - self.start_time) / self.duration).min(1.0) as f32
    }

    /// Fold this keyframe into `state` at the given linear progress.
    ///
    /// Interpolation starts from whatever `state` holds for the property,
    /// so the result depends on every keyframe folded before this one.
    pub fn apply(&self, state: &mut VisualState, progress: f32) {
        let t = self.easing.apply(progress);
        match self.target {
            KeyframeTarget::Position(target) => state.position = state.position.lerp(&target, t),
            KeyframeTarget::Scale(target) => state.scale = state.scale.lerp(&target, t),
            KeyframeTarget::Rotation(target) => state.rotation = state.rotation.lerp(&target, t),
            KeyframeTarget::Alpha(target) => state.color.a = state.color.a.lerp(&target, t),
            KeyframeTarget::Color(target) => state.color = state.color.lerp(&target, t),
            KeyframeTarget::Flip => state.flip_vertical = !state.flip_vertical,
            KeyframeTarget::Shader(kind) => state.shader = kind,
        }
    }
}

/// Keyframes that were recorded to start together
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParallelGroup {
    pub start_time: f64,
    /// Longest member duration
    pub duration: f64,
    /// Indices into the timeline's keyframe list
    pub members: SmallVec<[usize; 4]>,
}

impl ParallelGroup {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// How a repeat group replays its cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Always play forward
    #[default]
    Normal,
    /// Alternate forward and backward each cycle
    PingPong,
}

/// Number of cycles a repeat group plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatCount {
    Times(u32),
    Indefinite,
}

impl RepeatCount {
    /// Enforce the at-least-one-cycle invariant
    pub fn normalized(self) -> Self {
        match self {
            RepeatCount::Times(n) => RepeatCount::Times(n.max(1)),
            RepeatCount::Indefinite => RepeatCount::Indefinite,
        }
    }

    pub fn is_indefinite(&self) -> bool {
        matches!(self, RepeatCount::Indefinite)
    }
}

impl From<u32> for RepeatCount {
    fn from(times: u32) -> Self {
        RepeatCount::Times(times)
    }
}

/// A closed sub-sequence of keyframes that is replayed
#[derive(Clone, Debug, PartialEq)]
pub struct RepeatGroup {
    pub start_time: f64,
    /// Length of one cycle: the furthest member end relative to `start_time`
    pub cycle_duration: f64,
    pub mode: RepeatMode,
    pub count: RepeatCount,
}

impl RepeatGroup {
    /// Time the group contributes to its timeline.
    ///
    /// An indefinite group counts as a single cycle since it has no finite
    /// length; scenes that need it to keep running must be sized by another
    /// entity.
    pub fn total_duration(&self) -> f64 {
        match self.count {
            RepeatCount::Times(n) => self.cycle_duration * n as f64,
            RepeatCount::Indefinite => self.cycle_duration,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.total_duration()
    }

    /// Map timeline time onto the absolute time inside the current cycle.
    ///
    /// Returns `None` while the group has not started. Once every cycle of a
    /// finite group has played the result freezes: at the cycle end for
    /// `Normal` and for even-count `PingPong`, at the cycle start for
    /// odd-count `PingPong`.
    pub fn remap(&self, elapsed: f64) -> Option<f64> {
        let group_time = elapsed - self.start_time;
        if group_time <= 0.0 {
            return None;
        }

        let cycle_duration = self.cycle_duration;
        if cycle_duration <= 0.0 {
            return Some(self.start_time);
        }

        let cycle = (group_time / cycle_duration).floor();

        if let RepeatCount::Times(n) = self.count {
            let n = n.max(1);
            if cycle >= n as f64 {
                let offset = match self.mode {
                    RepeatMode::Normal => cycle_duration,
                    RepeatMode::PingPong if n % 2 == 0 => cycle_duration,
                    RepeatMode::PingPong => 0.0,
                };
                return Some(self.start_time + offset);
            }
        }

        let cycle_time = group_time % cycle_duration;
        let local = match self.mode {
            RepeatMode::PingPong if (cycle as u64) % 2 == 1 => cycle_duration - cycle_time,
            _ => cycle_time,
        };

        Some(self.start_time + local)
    }
}
