//! Asset registry
//!
//! Scene definitions refer to assets by name. The registry is built once
//! from a manifest, asking an [`AssetLoader`] (the platform's texture and
//! sprite-sheet system) for a render handle per asset, and is then passed
//! explicitly to whatever builds the scenes.

use reel_core::RenderHandle;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Frame layout of a sprite sheet, handed to the loader untouched
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetPattern {
    /// Number of frames
    pub frames: u32,
    /// Frames per row
    pub columns: u32,
    #[serde(default = "default_seconds_per_frame")]
    pub seconds_per_frame: f64,
    /// Size of a single frame in pixels
    pub frame_size: [u32; 2],
    /// Top-left pixel of the first frame
    #[serde(default)]
    pub origin: [u32; 2],
    #[serde(default = "default_true")]
    pub looped: bool,
}

fn default_seconds_per_frame() -> f64 {
    0.1
}

fn default_true() -> bool {
    true
}

/// What an asset is made of
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetKind {
    /// Still texture
    Texture { path: String },
    /// Sprite sheet played back frame by frame
    SpriteSheet { path: String, pattern: SheetPattern },
}

impl AssetKind {
    pub fn path(&self) -> &str {
        match self {
            AssetKind::Texture { path } | AssetKind::SpriteSheet { path, .. } => path,
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, AssetKind::SpriteSheet { .. })
    }
}

/// Platform side of asset loading
pub trait AssetLoader {
    /// Load a texture and return its id
    fn load_texture(&mut self, path: &str) -> RenderHandle;

    /// Register a sprite-sheet pattern over `texture` and return a player id
    fn create_player(&mut self, texture: RenderHandle, pattern: &SheetPattern) -> RenderHandle;
}

/// A loaded asset
#[derive(Clone, Debug, PartialEq)]
pub struct AssetEntry {
    pub handle: RenderHandle,
    pub kind: AssetKind,
}

/// Name → render handle lookup
#[derive(Clone, Debug, Default)]
pub struct AssetRegistry {
    entries: FxHashMap<String, AssetEntry>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every asset of `manifest` through `loader`
    pub fn load<'a, L, I>(manifest: I, loader: &mut L) -> Self
    where
        L: AssetLoader + ?Sized,
        I: IntoIterator<Item = (&'a String, &'a AssetKind)>,
    {
        let mut registry = Self::new();
        for (name, kind) in manifest {
            registry.register(name.clone(), kind.clone(), loader);
        }
        registry
    }

    /// Load a single asset and register it under `name`
    pub fn register<L>(&mut self, name: impl Into<String>, kind: AssetKind, loader: &mut L) -> RenderHandle
    where
        L: AssetLoader + ?Sized,
    {
        let name = name.into();
        let handle = match &kind {
            AssetKind::Texture { path } => loader.load_texture(path),
            AssetKind::SpriteSheet { path, pattern } => {
                let texture = loader.load_texture(path);
                loader.create_player(texture, pattern)
            }
        };

        tracing::debug!(asset = %name, path = kind.path(), handle = handle.id(), "asset loaded");

        if self.entries.insert(name.clone(), AssetEntry { handle, kind }).is_some() {
            tracing::warn!(asset = %name, "asset registered twice, keeping the latest");
        }
        handle
    }

    pub fn handle(&self, name: &str) -> Result<RenderHandle> {
        self.entry(name).map(|entry| entry.handle)
    }

    pub fn entry(&self, name: &str) -> Result<&AssetEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| SceneError::UnknownAsset(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
