//! Reel Core
//!
//! Foundational types shared by the animation engine and the scene layer:
//!
//! - **Geometry**: `Vec2` and RGBA `Color`
//! - **Visual State**: the renderable snapshot of a sprite at a point in time
//! - **Interpolation**: linear blending of scalars, vectors and colors
//!
//! # Example
//!
//! ```rust
//! use reel_core::{Lerp, Vec2, VisualState};
//!
//! let state = VisualState::at(Vec2::new(100.0, 100.0));
//! let halfway = state.position.lerp(&Vec2::new(400.0, 100.0), 0.5);
//! assert_eq!(halfway, Vec2::new(250.0, 100.0));
//! ```

pub mod geometry;
pub mod lerp;
pub mod visual;

pub use geometry::{Color, Vec2};
pub use lerp::{lerp, Lerp};
pub use visual::{RenderHandle, ShaderKind, VisualState};
