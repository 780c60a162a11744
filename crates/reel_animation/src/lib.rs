//! Reel Animation System
//!
//! Keyframe timelines for scripted sprite presentations.
//!
//! # Features
//!
//! - **Easing**: quadratic, bounce, elastic and back curves
//! - **Keyframes**: typed property targets with duration and easing
//! - **Timelines**: sequential, parallel and repeating (normal or ping-pong) composition
//! - **Stateless evaluation**: the state at any time is a pure function of elapsed time
//!
//! # Example
//!
//! ```rust
//! use reel_animation::{Easing, Timeline};
//! use reel_core::{Vec2, VisualState};
//!
//! let mut timeline = Timeline::new(VisualState::at(Vec2::new(100.0, 100.0)));
//! timeline
//!     .move_to(Vec2::new(400.0, 100.0), 1.0)
//!     .delay(1.0)
//!     .fade_to_with_ease(0.5, 0.5, Easing::EaseOut);
//!
//! assert_eq!(timeline.duration(), 2.5);
//! assert_eq!(timeline.state_at(0.5).position, Vec2::new(250.0, 100.0));
//! ```

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod timeline;

pub use easing::Easing;
pub use keyframe::{
    Keyframe, KeyframeTarget, ParallelGroup, Property, RepeatCount, RepeatGroup, RepeatMode,
};
pub use presets::{screen_center_position, Presets};
pub use timeline::Timeline;
