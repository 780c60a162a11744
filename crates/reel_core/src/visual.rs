//! Renderable sprite state

use serde::{Deserialize, Serialize};

use crate::geometry::{Color, Vec2};

/// Opaque identifier of something the renderer knows how to draw
/// (a texture id or a sprite-sheet player id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderHandle(pub i32);

impl RenderHandle {
    /// Placeholder for sprites that draw through a custom callback only
    pub const NONE: RenderHandle = RenderHandle(-1);

    pub fn id(&self) -> i32 {
        self.0
    }
}

/// Pixel shader variant used when drawing a sprite
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShaderKind {
    #[default]
    Normal,
    RainbowTexture,
    RainbowStroke,
}

/// Snapshot of everything the renderer needs to draw one sprite
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub position: Vec2,
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    pub color: Color,
    pub flip_vertical: bool,
    pub shader: ShaderKind,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            color: Color::WHITE,
            flip_vertical: false,
            shader: ShaderKind::Normal,
        }
    }
}

impl VisualState {
    /// Default state placed at `position`
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: set scale
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set rotation (radians)
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Builder: set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Builder: set only the alpha channel
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.color.a = alpha;
        self
    }

    /// Builder: set the shader variant
    pub fn with_shader(mut self, shader: ShaderKind) -> Self {
        self.shader = shader;
        self
    }

    pub fn alpha(&self) -> f32 {
        self.color.a
    }
}
