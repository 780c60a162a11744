//! Headless platform stand-ins
//!
//! A loader that hands out ids without touching the disk and a draw sink
//! that records what would have been drawn. Used for dry runs and sampling.

use reel_core::{RenderHandle, VisualState};
use reel_scene::{AssetLoader, DrawFn, SheetPattern};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// First id handed out for sprite-sheet players
const PLAYER_ID_BASE: i32 = 1000;

/// Asset loader that only assigns ids
#[derive(Debug, Default)]
pub struct HeadlessLoader {
    textures: i32,
    players: i32,
}

impl AssetLoader for HeadlessLoader {
    fn load_texture(&mut self, path: &str) -> RenderHandle {
        let handle = RenderHandle(self.textures);
        self.textures += 1;
        tracing::trace!(path, handle = handle.id(), "texture");
        handle
    }

    fn create_player(&mut self, texture: RenderHandle, pattern: &SheetPattern) -> RenderHandle {
        let handle = RenderHandle(PLAYER_ID_BASE + self.players);
        self.players += 1;
        tracing::trace!(
            texture = texture.id(),
            frames = pattern.frames,
            handle = handle.id(),
            "sprite-sheet player"
        );
        handle
    }
}

/// How a recorded draw would have been rendered
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawKind {
    Sprite,
    SpriteSheet,
    Text { text: String },
}

/// One draw call
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DrawRecord {
    #[serde(flatten)]
    pub kind: DrawKind,
    pub handle: RenderHandle,
    pub state: VisualState,
}

#[derive(Debug, Default)]
struct SinkState {
    total_draws: u64,
    frame: Vec<DrawRecord>,
}

/// Collects draw calls from render callbacks
#[derive(Clone, Debug, Default)]
pub struct DrawSink {
    inner: Arc<Mutex<SinkState>>,
}

impl DrawSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback drawing a still texture
    pub fn sprite(&self) -> DrawFn {
        self.callback(DrawKind::Sprite)
    }

    /// Callback drawing a sprite-sheet player
    pub fn sprite_sheet(&self) -> DrawFn {
        self.callback(DrawKind::SpriteSheet)
    }

    /// Callback drawing a line of text
    pub fn text(&self, text: &str) -> DrawFn {
        self.callback(DrawKind::Text {
            text: text.to_string(),
        })
    }

    fn callback(&self, kind: DrawKind) -> DrawFn {
        let inner = self.inner.clone();
        Box::new(move |handle, state| {
            if let Ok(mut sink) = inner.lock() {
                sink.total_draws += 1;
                sink.frame.push(DrawRecord {
                    kind: kind.clone(),
                    handle,
                    state: *state,
                });
            }
        })
    }

    /// Forget the draws of the previous frame
    pub fn begin_frame(&self) {
        if let Ok(mut sink) = self.inner.lock() {
            sink.frame.clear();
        }
    }

    /// Draws recorded since the last `begin_frame`
    pub fn frame(&self) -> Vec<DrawRecord> {
        self.inner
            .lock()
            .map(|sink| sink.frame.clone())
            .unwrap_or_default()
    }

    pub fn total_draws(&self) -> u64 {
        self.inner.lock().map(|sink| sink.total_draws).unwrap_or(0)
    }
}
