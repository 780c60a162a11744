//! Reel configuration file handling

use anyhow::{Context, Result};
use reel_core::Vec2;
use reel_scene::{AssetKind, SheetPattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "reel.toml";

/// Top-level Reel configuration (reel.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct ReelConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// Asset name → source
    #[serde(default = "default_assets")]
    pub assets: BTreeMap<String, AssetKind>,
}

/// Screen the presentation is authored for
#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_title() -> String {
    "Reel".to_string()
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    900
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl WindowConfig {
    pub fn screen_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Headless playback settings
#[derive(Debug, Deserialize, Serialize)]
pub struct PlaybackConfig {
    /// Ticks per second
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Stop after this many seconds even if the last scene never ends
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,
}

fn default_fps() -> u32 {
    60
}

fn default_max_seconds() -> f64 {
    120.0
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            max_seconds: default_max_seconds(),
        }
    }
}

/// Logging settings; `RUST_LOG` takes precedence
#[derive(Debug, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn texture(path: &str) -> AssetKind {
    AssetKind::Texture {
        path: path.to_string(),
    }
}

fn sheet(path: &str, frames: u32, columns: u32, seconds: f64, size: [u32; 2], looped: bool) -> AssetKind {
    AssetKind::SpriteSheet {
        path: path.to_string(),
        pattern: SheetPattern {
            frames,
            columns,
            seconds_per_frame: seconds,
            frame_size: size,
            origin: [0, 0],
            looped,
        },
    }
}

/// Assets used by the built-in demo scenes
pub fn default_assets() -> BTreeMap<String, AssetKind> {
    [
        ("background", texture("assets/white.png")),
        ("running_man_000", sheet("assets/runningman000.png", 8, 8, 0.1, [100, 200], true)),
        ("running_man_001", sheet("assets/runningman001.png", 10, 5, 0.1, [140, 200], true)),
        ("running_man_003", sheet("assets/runningman003.png", 10, 5, 0.1, [140, 200], true)),
        ("background_star", sheet("assets/starburst_640x480-min.png", 5, 2, 0.05, [640, 480], true)),
        ("stage_open", sheet("assets/pipo-curtain1.png", 10, 1, 0.1, [640, 480], false)),
        ("stage_close", sheet("assets/pipo-curtain2.png", 18, 1, 0.05, [640, 480], true)),
        ("foreground_japan", texture("assets/S1_FG1.png")),
        ("background_japan", texture("assets/S1_BB1.png")),
        ("background_world_end", texture("assets/S1_BB2.png")),
        ("ground", texture("assets/S1_Ground.png")),
        ("foreground_shinjuku", texture("assets/S2_FG.png")),
        ("background_shinjuku_01", texture("assets/S2_BG1.png")),
        ("background_shinjuku_02", texture("assets/S2_BG2.png")),
    ]
    .into_iter()
    .map(|(name, kind)| (name.to_string(), kind))
    .collect()
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            playback: PlaybackConfig::default(),
            log: LogConfig::default(),
            assets: default_assets(),
        }
    }
}

impl ReelConfig {
    /// Resolve `path` to a config file (a file, or reel.toml inside a directory)
    pub fn config_path(path: &Path) -> PathBuf {
        if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        }
    }

    /// Load configuration from a directory (looks for reel.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = Self::config_path(path);

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `reel init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Load configuration, falling back to defaults when no file exists
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if Self::config_path(path).exists() {
            Self::load_from_dir(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ReelConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn validate(&self) -> Result<()> {
        if self.playback.fps == 0 {
            anyhow::bail!("playback.fps must be at least 1");
        }
        if self.playback.max_seconds.is_nan() || self.playback.max_seconds <= 0.0 {
            anyhow::bail!("playback.max_seconds must be positive");
        }
        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!("window size must be non-zero");
        }
        Ok(())
    }
}
