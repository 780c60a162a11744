//! Reel Scenes
//!
//! Playback layer on top of `reel_animation`:
//!
//! - **Entities**: a render handle paired with its timeline
//! - **Scenes**: entities sharing one time origin, sized by their longest timeline
//! - **Sequencer**: plays scenes back to back, re-latching the origin on each hand-off
//! - **Assets**: an explicit registry mapping asset names to render handles
//!
//! # Example
//!
//! ```rust
//! use reel_core::{RenderHandle, Vec2, VisualState};
//! use reel_scene::{AnimatedEntity, Scene, SceneSequencer};
//!
//! let mut hero = AnimatedEntity::new(RenderHandle(1), VisualState::default());
//! hero.timeline_mut().move_to(Vec2::new(100.0, 0.0), 2.0);
//!
//! let mut scene = Scene::new("intro");
//! scene.add(hero, Box::new(|_handle, _state| {}));
//!
//! let mut sequencer = SceneSequencer::new();
//! sequencer.push(scene);
//! sequencer.tick(0.0);
//! sequencer.tick(2.0);
//! assert!(sequencer.is_finished());
//! ```

pub mod assets;
pub mod clock;
pub mod entity;
pub mod error;
pub mod scene;
pub mod sequencer;

pub use assets::{AssetEntry, AssetKind, AssetLoader, AssetRegistry, SheetPattern};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::AnimatedEntity;
pub use error::{Result, SceneError};
pub use scene::{DrawFn, EntityId, Scene};
pub use sequencer::SceneSequencer;
