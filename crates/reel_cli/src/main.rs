//! Reel CLI
//!
//! Plays back and samples the built-in presentation without a renderer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reel_core::{RenderHandle, VisualState};
use reel_scene::{AssetRegistry, Clock, ManualClock};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod demo;
mod headless;

use config::{ReelConfig, CONFIG_FILE};
use headless::{DrawSink, HeadlessLoader};

#[derive(Parser)]
#[command(name = "reel")]
#[command(author, version, about = "Scripted sprite presentations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory or config file
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the presentation headlessly at a fixed frame rate
    Run {
        /// Ticks per second (overrides playback.fps)
        #[arg(long)]
        fps: Option<u32>,

        /// Stop after this many seconds (overrides playback.max_seconds)
        #[arg(long)]
        max_seconds: Option<f64>,
    },

    /// Print the state of every entity of a scene at a given time as JSON
    Sample {
        /// Scene index, in play order
        #[arg(short, long, default_value = "0")]
        scene: usize,

        /// Seconds since the scene started
        #[arg(short, long)]
        time: f64,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List the scenes and their lengths
    List,

    /// Write a default reel.toml
    Init {
        /// Directory to create the config in
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct EntitySample {
    handle: RenderHandle,
    state: VisualState,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.command {
        Commands::Init { .. } => ReelConfig::default(),
        _ => ReelConfig::load_or_default(&cli.config)?,
    };

    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Run { fps, max_seconds } => cmd_run(&config, fps, max_seconds),
        Commands::Sample {
            scene,
            time,
            pretty,
        } => cmd_sample(&config, scene, time, pretty),
        Commands::List => cmd_list(&config),
        Commands::Init { path, force } => cmd_init(&path, force),
    }
}

fn init_logging(config: &ReelConfig, verbose: bool) {
    let fallback = if verbose { "debug" } else { config.log.filter.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_demo(config: &ReelConfig, sink: &DrawSink) -> Result<reel_scene::SceneSequencer> {
    let mut loader = HeadlessLoader::default();
    let assets = AssetRegistry::load(&config.assets, &mut loader);
    debug!(assets = assets.len(), "assets registered");

    demo::build_demo(&assets, config.window.screen_size(), sink)
        .context("Failed to build demo scenes")
}

fn cmd_run(config: &ReelConfig, fps: Option<u32>, max_seconds: Option<f64>) -> Result<()> {
    let fps = fps.unwrap_or(config.playback.fps).max(1);
    let max_seconds = max_seconds.unwrap_or(config.playback.max_seconds);
    if max_seconds.is_nan() || max_seconds <= 0.0 {
        anyhow::bail!("--max-seconds must be positive");
    }

    let sink = DrawSink::new();
    let mut sequencer = load_demo(config, &sink)?;

    info!(
        title = %config.window.title,
        scenes = sequencer.len(),
        fps,
        "playing"
    );

    let clock = ManualClock::new(0.0);
    let step = 1.0 / fps as f64;
    let mut frames = 0u64;

    while !sequencer.is_finished() && clock.now() < max_seconds {
        sink.begin_frame();
        sequencer.tick(clock.now());
        frames += 1;
        clock.advance(step);
    }

    if sequencer.is_finished() {
        info!(
            frames,
            draws = sink.total_draws(),
            seconds = clock.now(),
            "presentation finished"
        );
    } else {
        warn!(
            frames,
            scene = sequencer.current_index(),
            "stopped after {max_seconds}s before the last scene ended"
        );
    }

    Ok(())
}

fn cmd_sample(config: &ReelConfig, index: usize, time: f64, pretty: bool) -> Result<()> {
    let sink = DrawSink::new();
    let sequencer = load_demo(config, &sink)?;
    let scene = sequencer.scene(index)?;

    debug!(scene = scene.name(), time, "sampling");

    let samples: Vec<EntitySample> = scene
        .sample(time)
        .into_iter()
        .map(|(handle, state)| EntitySample { handle, state })
        .collect();

    let json = if pretty {
        serde_json::to_string_pretty(&samples)?
    } else {
        serde_json::to_string(&samples)?
    };
    println!("{json}");
    Ok(())
}

fn cmd_list(config: &ReelConfig) -> Result<()> {
    let sink = DrawSink::new();
    let sequencer = load_demo(config, &sink)?;

    for (index, scene) in sequencer.scenes().iter().enumerate() {
        println!(
            "{index}: {:<20} {:>3} entities  {:>6.2}s",
            scene.name(),
            scene.len(),
            scene.authored_duration()
        );
    }
    println!("total: {:.2}s", sequencer.total_duration());
    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let content = ReelConfig::default().to_toml()?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    info!("Created {}", config_path.display());
    Ok(())
}
