//! Timeline authoring and evaluation
//!
//! A [`Timeline`] records a chain of transform commands for one sprite and
//! computes the sprite's [`VisualState`] at any elapsed time.
//!
//! Authoring resolves every keyframe's absolute start time as it is
//! recorded: outside a group each command starts where the previous one
//! ended, inside a parallel group all commands share the group's start, and
//! a repeat group advances the timeline by its cycle length times its count.
//!
//! Evaluation folds every keyframe in recording order on top of the initial
//! state. It never mutates the timeline, so it can be called for any time in
//! any order (scrubbing) and always returns the same state for the same
//! input.
//!
//! Malformed authoring (an `end_*` without its `begin_*`, nested groups) is
//! tolerated: the offending call is ignored and recording continues.
//!
//! # Example
//!
//! ```rust
//! use reel_animation::{Easing, RepeatCount, RepeatMode, Timeline};
//! use reel_core::{Vec2, VisualState};
//!
//! let mut timeline = Timeline::new(VisualState::at(Vec2::new(100.0, 100.0)));
//! timeline
//!     .move_to(Vec2::new(400.0, 100.0), 1.0)
//!     .begin_repeat(RepeatMode::PingPong, RepeatCount::Times(3))
//!     .begin_parallel()
//!     .scale_to_with_ease(Vec2::splat(1.5), 0.5, Easing::EaseOut)
//!     .fade_to(0.5, 0.5)
//!     .end_parallel()
//!     .end_repeat()
//!     .move_to(Vec2::new(400.0, 400.0), 1.0);
//!
//! assert_eq!(timeline.duration(), 3.5);
//! ```

use reel_core::{Color, ShaderKind, Vec2, VisualState};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::keyframe::{Keyframe, KeyframeTarget, ParallelGroup, RepeatCount, RepeatGroup, RepeatMode};

/// Parallel group being recorded
#[derive(Clone, Debug)]
struct OpenParallel {
    start_time: f64,
    extent: f64,
    members: SmallVec<[usize; 4]>,
}

/// Repeat group being recorded
#[derive(Clone, Debug)]
struct OpenRepeat {
    index: usize,
    start_time: f64,
    mode: RepeatMode,
    count: RepeatCount,
}

/// Keyframe timeline of a single sprite
#[derive(Clone, Debug)]
pub struct Timeline {
    initial: VisualState,
    keyframes: Vec<Keyframe>,
    repeat_groups: Vec<RepeatGroup>,
    parallel_groups: Vec<ParallelGroup>,
    total_duration: f64,
    open_parallel: Option<OpenParallel>,
    open_repeat: Option<OpenRepeat>,
}

impl Timeline {
    /// Create an empty timeline starting from `initial`
    pub fn new(initial: VisualState) -> Self {
        Self {
            initial,
            keyframes: Vec::new(),
            repeat_groups: Vec::new(),
            parallel_groups: Vec::new(),
            total_duration: 0.0,
            open_parallel: None,
            open_repeat: None,
        }
    }

    /// Discard everything recorded so far and restart from `initial`
    pub fn init(&mut self, initial: VisualState) -> &mut Self {
        *self = Self::new(initial);
        self
    }

    // =========================================================================
    // Transform commands
    // =========================================================================

    /// Move to `position` linearly
    pub fn move_to(&mut self, position: Vec2, duration: f64) -> &mut Self {
        self.move_to_with_ease(position, duration, Easing::Linear)
    }

    /// Move to `position` with specific easing
    pub fn move_to_with_ease(&mut self, position: Vec2, duration: f64, easing: Easing) -> &mut Self {
        self.record(KeyframeTarget::Position(position), duration, easing)
    }

    /// Scale to `scale` linearly
    pub fn scale_to(&mut self, scale: Vec2, duration: f64) -> &mut Self {
        self.scale_to_with_ease(scale, duration, Easing::Linear)
    }

    /// Scale to `scale` with specific easing
    pub fn scale_to_with_ease(&mut self, scale: Vec2, duration: f64, easing: Easing) -> &mut Self {
        self.record(KeyframeTarget::Scale(scale), duration, easing)
    }

    /// Rotate to `radians` linearly
    pub fn rotate_to(&mut self, radians: f32, duration: f64) -> &mut Self {
        self.rotate_to_with_ease(radians, duration, Easing::Linear)
    }

    /// Rotate to `radians` with specific easing
    pub fn rotate_to_with_ease(&mut self, radians: f32, duration: f64, easing: Easing) -> &mut Self {
        self.record(KeyframeTarget::Rotation(radians), duration, easing)
    }

    /// Fade the alpha channel to `alpha` linearly
    pub fn fade_to(&mut self, alpha: f32, duration: f64) -> &mut Self {
        self.fade_to_with_ease(alpha, duration, Easing::Linear)
    }

    /// Fade the alpha channel to `alpha` with specific easing
    pub fn fade_to_with_ease(&mut self, alpha: f32, duration: f64, easing: Easing) -> &mut Self {
        self.record(KeyframeTarget::Alpha(alpha), duration, easing)
    }

    /// Blend all four color channels to `color` linearly
    pub fn color_to(&mut self, color: Color, duration: f64) -> &mut Self {
        self.color_to_with_ease(color, duration, Easing::Linear)
    }

    /// Blend all four color channels to `color` with specific easing
    pub fn color_to_with_ease(&mut self, color: Color, duration: f64, easing: Easing) -> &mut Self {
        self.record(KeyframeTarget::Color(color), duration, easing)
    }

    /// Toggle vertical flip at the current point of the timeline
    pub fn flip(&mut self) -> &mut Self {
        self.record(KeyframeTarget::Flip, 0.0, Easing::Linear)
    }

    /// Switch shader at the current point of the timeline
    pub fn shader_to(&mut self, kind: ShaderKind) -> &mut Self {
        self.record(KeyframeTarget::Shader(kind), 0.0, Easing::Linear)
    }

    /// Leave a gap of `duration` seconds.
    ///
    /// Inside a parallel group the gap widens the group instead, so a group
    /// can be held open longer than its longest keyframe.
    pub fn delay(&mut self, duration: f64) -> &mut Self {
        let duration = sanitize_duration(duration);
        match self.open_parallel.as_mut() {
            Some(group) => group.extent = group.extent.max(duration),
            None => self.total_duration += duration,
        }
        self
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Start a parallel group; following commands share one start time
    pub fn begin_parallel(&mut self) -> &mut Self {
        if self.open_parallel.is_some() {
            tracing::debug!("begin_parallel while a parallel group is open, ignored");
            return self;
        }
        self.open_parallel = Some(OpenParallel {
            start_time: self.total_duration,
            extent: 0.0,
            members: SmallVec::new(),
        });
        self
    }

    /// Close the parallel group and continue after its longest member
    pub fn end_parallel(&mut self) -> &mut Self {
        let Some(group) = self.open_parallel.take() else {
            tracing::debug!("end_parallel without begin_parallel, ignored");
            return self;
        };
        self.total_duration = group.start_time + group.extent;
        self.parallel_groups.push(ParallelGroup {
            start_time: group.start_time,
            duration: group.extent,
            members: group.members,
        });
        self
    }

    /// Start a repeat group.
    ///
    /// Repeat groups do not nest and cannot be opened inside a parallel
    /// group; parallel groups can be opened inside a repeat group.
    pub fn begin_repeat(&mut self, mode: RepeatMode, count: impl Into<RepeatCount>) -> &mut Self {
        if self.open_repeat.is_some() {
            tracing::debug!("begin_repeat while a repeat group is open, ignored");
            return self;
        }
        if self.open_parallel.is_some() {
            tracing::debug!("begin_repeat inside a parallel group, ignored");
            return self;
        }
        self.open_repeat = Some(OpenRepeat {
            index: self.repeat_groups.len(),
            start_time: self.total_duration,
            mode,
            count: count.into().normalized(),
        });
        self
    }

    /// Close the repeat group and continue after its last cycle
    pub fn end_repeat(&mut self) -> &mut Self {
        if self.open_parallel.is_some() {
            tracing::debug!("end_repeat while a parallel group is open, ignored");
            return self;
        }
        let Some(open) = self.open_repeat.take() else {
            tracing::debug!("end_repeat without begin_repeat, ignored");
            return self;
        };

        let cycle_duration = self
            .keyframes
            .iter()
            .filter(|kf| kf.repeat_group == Some(open.index))
            .map(|kf| kf.end_time() - open.start_time)
            .fold(0.0, f64::max);

        let group = RepeatGroup {
            start_time: open.start_time,
            cycle_duration,
            mode: open.mode,
            count: open.count,
        };
        self.total_duration = group.end_time();
        self.repeat_groups.push(group);
        self
    }

    fn record(&mut self, target: KeyframeTarget, duration: f64, easing: Easing) -> &mut Self {
        let duration = sanitize_duration(duration);
        let index = self.keyframes.len();

        let start_time = match self.open_parallel.as_mut() {
            Some(group) => {
                group.extent = group.extent.max(duration);
                group.members.push(index);
                group.start_time
            }
            None => {
                let start = self.total_duration;
                self.total_duration += duration;
                start
            }
        };

        self.keyframes.push(Keyframe {
            target,
            duration,
            easing,
            start_time,
            repeat_group: self.open_repeat.as_ref().map(|group| group.index),
        });
        self
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Compute the sprite state `elapsed` seconds after the timeline origin
    pub fn state_at(&self, elapsed: f64) -> VisualState {
        let mut state = self.initial;
        if elapsed <= 0.0 || elapsed.is_nan() {
            return state;
        }

        for keyframe in &self.keyframes {
            let group = keyframe
                .repeat_group
                .and_then(|index| self.repeat_groups.get(index));

            let effective_time = match group {
                Some(group) => match group.remap(elapsed) {
                    Some(time) => time,
                    None => continue,
                },
                None => elapsed,
            };

            if keyframe.start_time > effective_time {
                continue;
            }

            keyframe.apply(&mut state, keyframe.progress(effective_time));
        }

        state
    }

    /// Total authored length in seconds
    pub fn duration(&self) -> f64 {
        self.total_duration
    }

    pub fn initial_state(&self) -> &VisualState {
        &self.initial
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn repeat_groups(&self) -> &[RepeatGroup] {
        &self.repeat_groups
    }

    pub fn parallel_groups(&self) -> &[ParallelGroup] {
        &self.parallel_groups
    }

    /// Whether a parallel or repeat group is still waiting for its `end_*`
    pub fn is_authoring_open(&self) -> bool {
        self.open_parallel.is_some() || self.open_repeat.is_some()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(VisualState::default())
    }
}

/// Negative and non-finite durations record as zero
fn sanitize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn approx_vec(a: Vec2, b: Vec2) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    fn origin() -> VisualState {
        VisualState::at(Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_state_at_zero_is_initial() {
        let mut tl = Timeline::new(origin());
        tl.move_to(Vec2::new(400.0, 100.0), 1.0).flip();
        assert_eq!(tl.state_at(0.0), origin());
        assert_eq!(tl.state_at(-1.0), origin());
    }

    #[test]
    fn test_sequential_start_times() {
        let mut tl = Timeline::new(origin());
        tl.move_to(Vec2::ZERO, 1.0)
            .delay(0.5)
            .scale_to(Vec2::ONE, 2.0)
            .fade_to(0.0, 0.25);

        let starts: Vec<f64> = tl.keyframes().iter().map(|kf| kf.start_time).collect();
        assert_eq!(starts, vec![0.0, 1.5, 3.5]);
        assert_eq!(tl.duration(), 3.75);
    }

    #[test]
    fn test_move_delay_fade_scenario() {
        let mut tl = Timeline::new(origin());
        tl.move_to(Vec2::new(400.0, 100.0), 1.0)
            .delay(1.0)
            .fade_to(0.5, 0.5);

        let s = tl.state_at(0.5);
        assert!(approx_vec(s.position, Vec2::new(250.0, 100.0)));
        assert_eq!(s.color.a, 1.0);

        assert!(approx_vec(tl.state_at(1.0).position, Vec2::new(400.0, 100.0)));
        assert!(approx(tl.state_at(2.25).color.a, 0.75));
        assert!(approx(tl.state_at(2.5).color.a, 0.5));
        assert_eq!(tl.state_at(2.5), tl.state_at(10.0));
    }

    #[test]
    fn test_linear_midpoint() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(2.0).rotate_to(1.0, 4.0);
        assert!(approx(tl.state_at(4.0).rotation, 0.5));
    }

    #[test]
    fn test_easing_overshoot_reaches_state() {
        let mut tl = Timeline::new(VisualState::default());
        tl.move_to_with_ease(Vec2::new(100.0, 0.0), 1.0, Easing::Back);
        assert!(tl.state_at(0.3).position.x < 0.0);
        assert!(approx(tl.state_at(1.0).position.x, 100.0));
    }

    #[test]
    fn test_later_keyframes_start_from_carried_state() {
        let mut tl = Timeline::new(VisualState::default());
        tl.move_to(Vec2::new(100.0, 0.0), 1.0)
            .move_to(Vec2::new(100.0, 100.0), 1.0);
        assert!(approx_vec(tl.state_at(1.5).position, Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_parallel_group_shares_start() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(1.0)
            .begin_parallel()
            .scale_to(Vec2::splat(0.75), 3.0)
            .move_to(Vec2::new(1800.0, 550.0), 2.0)
            .end_parallel()
            .fade_to(0.0, 1.0);

        let kfs = tl.keyframes();
        assert_eq!(kfs[0].start_time, 1.0);
        assert_eq!(kfs[1].start_time, 1.0);
        assert_eq!(kfs[2].start_time, 4.0);
        assert_eq!(tl.duration(), 5.0);

        let group = &tl.parallel_groups()[0];
        assert_eq!(group.duration, 3.0);
        assert_eq!(group.members.as_slice(), &[0, 1]);

        // Both members are in flight at the same time
        let s = tl.state_at(2.0);
        assert!(approx_vec(s.position, Vec2::new(900.0, 275.0)));
        assert!(approx(s.scale.x, 1.0 - 0.25 / 3.0));
    }

    #[test]
    fn test_delay_inside_parallel_widens_group() {
        let mut tl = Timeline::new(VisualState::default());
        tl.begin_parallel().fade_to(0.0, 1.0).delay(3.0).end_parallel();
        assert_eq!(tl.duration(), 3.0);
    }

    #[test]
    fn test_unmatched_group_calls_are_ignored() {
        let mut tl = Timeline::new(VisualState::default());
        tl.end_parallel()
            .end_repeat()
            .move_to(Vec2::new(10.0, 0.0), 1.0)
            .begin_parallel()
            .begin_parallel()
            .fade_to(0.0, 2.0)
            .end_parallel()
            .end_parallel();

        assert_eq!(tl.duration(), 3.0);
        assert_eq!(tl.parallel_groups().len(), 1);
        assert!(!tl.is_authoring_open());
    }

    #[test]
    fn test_repeat_normal_wraps_cycles() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(1.0)
            .begin_repeat(RepeatMode::Normal, RepeatCount::Times(3))
            .move_to(Vec2::new(100.0, 0.0), 2.0)
            .end_repeat();

        assert_eq!(tl.repeat_groups()[0].cycle_duration, 2.0);
        assert_eq!(tl.duration(), 7.0);

        let first = tl.state_at(1.0 + 0.5 * 2.0);
        let third = tl.state_at(1.0 + 2.5 * 2.0);
        assert_eq!(first, third);
        assert!(approx(first.position.x, 50.0));
    }

    #[test]
    fn test_repeat_ping_pong_mirrors_second_cycle() {
        let mut tl = Timeline::new(VisualState::default());
        tl.begin_repeat(RepeatMode::PingPong, RepeatCount::Times(2))
            .move_to_with_ease(Vec2::new(100.0, 0.0), 1.0, Easing::EaseIn)
            .end_repeat();

        let s = tl.state_at(1.25);
        let expected = Easing::EaseIn.apply(1.0 - 0.25) * 100.0;
        assert!(approx(s.position.x, expected));
        assert!(!approx(s.position.x, Easing::EaseIn.apply(0.25) * 100.0));
    }

    #[test]
    fn test_repeat_then_sequential_keyframe() {
        let mut tl = Timeline::new(VisualState::at(Vec2::new(500.0, 100.0)));
        tl.begin_repeat(RepeatMode::Normal, RepeatCount::Times(2))
            .move_to(Vec2::new(600.0, 100.0), 0.5)
            .move_to(Vec2::new(600.0, 200.0), 0.5)
            .move_to(Vec2::new(500.0, 200.0), 0.5)
            .move_to(Vec2::new(500.0, 100.0), 0.5)
            .end_repeat()
            .scale_to(Vec2::splat(2.0), 1.0);

        assert_eq!(tl.duration(), 5.0);
        assert_eq!(tl.keyframes()[4].start_time, 4.0);

        // Second lap, halfway along the second edge
        assert!(approx_vec(tl.state_at(2.75).position, Vec2::new(600.0, 150.0)));
        // After the loop: back home and scaling
        let s = tl.state_at(4.5);
        assert!(approx_vec(s.position, Vec2::new(500.0, 100.0)));
        assert!(approx(s.scale.x, 1.5));
    }

    #[test]
    fn test_indefinite_repeat_counts_one_cycle() {
        let mut tl = Timeline::new(VisualState::default());
        tl.begin_repeat(RepeatMode::PingPong, RepeatCount::Indefinite)
            .rotate_to(1.0, 2.0)
            .end_repeat();

        assert_eq!(tl.duration(), 2.0);
        // Keeps cycling well past the recorded duration
        assert!(approx(tl.state_at(101.0).rotation, 0.5));
        assert!(approx(tl.state_at(103.5).rotation, 0.25));
    }

    #[test]
    fn test_repeat_group_with_parallel_inside() {
        let mut tl = Timeline::new(VisualState::default());
        tl.begin_repeat(RepeatMode::Normal, RepeatCount::Times(2))
            .begin_parallel()
            .scale_to(Vec2::splat(2.0), 1.0)
            .rotate_to(1.0, 0.5)
            .end_parallel()
            .end_repeat();

        assert_eq!(tl.repeat_groups()[0].cycle_duration, 1.0);
        assert_eq!(tl.duration(), 2.0);
        let s = tl.state_at(1.25);
        assert!(approx(s.scale.x, 1.25));
        assert!(approx(s.rotation, 0.5));
    }

    #[test]
    fn test_unclosed_repeat_evaluates_without_remap() {
        let mut tl = Timeline::new(VisualState::default());
        tl.begin_repeat(RepeatMode::Normal, RepeatCount::Times(5)).fade_to(0.0, 1.0);

        assert!(tl.is_authoring_open());
        assert_eq!(tl.duration(), 1.0);
        assert!(approx(tl.state_at(0.5).color.a, 0.5));
        assert_eq!(tl.state_at(3.0).color.a, 0.0);
    }

    #[test]
    fn test_flips_replay_in_order() {
        let mut tl = Timeline::new(VisualState::default());
        tl.flip().delay(1.0).flip().delay(1.0).flip();

        assert!(tl.state_at(0.5).flip_vertical);
        assert!(!tl.state_at(1.5).flip_vertical);
        assert!(tl.state_at(2.5).flip_vertical);
        // Scrubbing backwards gives the same answer
        assert!(!tl.state_at(1.5).flip_vertical);
    }

    #[test]
    fn test_shader_switch() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(1.0)
            .shader_to(ShaderKind::RainbowTexture)
            .delay(1.0)
            .shader_to(ShaderKind::RainbowStroke);

        assert_eq!(tl.state_at(0.5).shader, ShaderKind::Normal);
        assert_eq!(tl.state_at(1.0).shader, ShaderKind::RainbowTexture);
        assert_eq!(tl.state_at(5.0).shader, ShaderKind::RainbowStroke);
    }

    #[test]
    fn test_color_and_alpha_layering() {
        let mut tl = Timeline::new(VisualState::default().with_color(Color::INVISIBLE_WHITE));
        tl.color_to(Color::rgba(1.0, 0.0, 0.0, 0.0), 1.0).fade_to(1.0, 1.0);

        let s = tl.state_at(1.5);
        assert!(approx(s.color.g, 0.0));
        assert!(approx(s.color.a, 0.5));
        assert_eq!(tl.state_at(2.0).color, Color::RED);
    }

    #[test]
    fn test_zero_duration_keyframe_snaps() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(1.0).move_to(Vec2::new(5.0, 5.0), 0.0);
        assert_eq!(tl.state_at(0.99).position, Vec2::ZERO);
        assert_eq!(tl.state_at(1.0).position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_bad_durations_are_zero() {
        let mut tl = Timeline::new(VisualState::default());
        tl.delay(-1.0).fade_to(0.0, f64::NAN).delay(f64::INFINITY);
        assert_eq!(tl.duration(), 0.0);
        assert_eq!(tl.state_at(0.1).color.a, 0.0);
    }

    #[test]
    fn test_init_resets() {
        let mut tl = Timeline::new(VisualState::default());
        tl.move_to(Vec2::ONE, 3.0).begin_parallel();
        tl.init(origin());
        assert_eq!(tl.duration(), 0.0);
        assert!(tl.keyframes().is_empty());
        assert!(!tl.is_authoring_open());
        assert_eq!(tl.state_at(1.0), origin());
    }
}
