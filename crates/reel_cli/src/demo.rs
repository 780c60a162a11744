//! Built-in demo presentation

use reel_animation::{Easing, Presets, RepeatCount, RepeatMode};
use reel_core::{Color, RenderHandle, Vec2, VisualState};
use reel_scene::{AnimatedEntity, AssetRegistry, DrawFn, Result, Scene, SceneSequencer};

use crate::headless::DrawSink;

/// Names of the demo scenes, in play order
pub const SCENE_NAMES: [&str; 3] = ["kooler-presents", "running-man", "repeat-showcase"];

const RUNNER_SIZE: Vec2 = Vec2 { x: 100.0, y: 200.0 };
const TITLE_SIZE: Vec2 = Vec2 { x: 400.0, y: 80.0 };
const WORLD_OFFSET: Vec2 = Vec2 { x: -2400.0, y: 0.0 };

/// Resolves asset names to entities with the matching draw callback
struct SceneBuilder<'a> {
    assets: &'a AssetRegistry,
    sink: &'a DrawSink,
    screen: Vec2,
}

impl SceneBuilder<'_> {
    fn sprite(&self, asset: &str, initial: VisualState) -> Result<(AnimatedEntity, DrawFn)> {
        let entry = self.assets.entry(asset)?;
        let draw = if entry.kind.is_animated() {
            self.sink.sprite_sheet()
        } else {
            self.sink.sprite()
        };
        Ok((AnimatedEntity::new(entry.handle, initial), draw))
    }

    fn text(&self, text: &str, initial: VisualState) -> (AnimatedEntity, DrawFn) {
        (AnimatedEntity::new(RenderHandle::NONE, initial), self.sink.text(text))
    }

    fn kooler_presents(&self) -> Result<Scene> {
        let mut scene = Scene::new(SCENE_NAMES[0]);

        let (background, draw) = self.sprite("background", Presets::background(Color::BLACK))?;
        scene.add(background, draw);

        let (mut title, draw) = self.text(
            "KOOLER PRESENTS",
            Presets::centered(TITLE_SIZE, self.screen, Color::INVISIBLE_WHITE),
        );
        Presets::title_card(title.timeline_mut(), 1.0, 2.0, 1.0, 2.0, Easing::EaseInOut);
        scene.add(title, draw);

        let (mut curtain, draw) = self.sprite("stage_open", VisualState::default())?;
        curtain.timeline_mut().delay(1.0).fade_to(0.0, 1.0);
        scene.add(curtain, draw);

        Ok(scene)
    }

    fn running_man(&self) -> Result<Scene> {
        let mut scene = Scene::new(SCENE_NAMES[1]);

        let (mut stars, draw) =
            self.sprite("background_star", Presets::background(Color::INVISIBLE_WHITE))?;
        stars
            .timeline_mut()
            .fade_to_with_ease(1.0, 1.0, Easing::EaseOut)
            .delay(4.5)
            .fade_to_with_ease(0.0, 2.0, Easing::EaseOut);
        scene.add(stars, draw);

        for (asset, fade_in) in [
            ("background_japan", 2.0),
            ("foreground_japan", 1.75),
            ("ground", 1.5),
        ] {
            let (mut layer, draw) = self.sprite(
                asset,
                VisualState::at(WORLD_OFFSET).with_color(Color::INVISIBLE_WHITE),
            )?;
            layer
                .timeline_mut()
                .delay(5.5)
                .fade_to_with_ease(1.0, fade_in, Easing::EaseIn);
            scene.add(layer, draw);
        }

        let (mut runner, draw) = self.sprite(
            "running_man_000",
            Presets::centered(RUNNER_SIZE, self.screen, Color::WHITE),
        )?;
        runner
            .timeline_mut()
            .delay(1.0)
            .scale_to_with_ease(Vec2::splat(1.5), 3.0, Easing::EaseIn)
            .delay(0.5)
            .begin_parallel()
            .scale_to_with_ease(Vec2::splat(0.75), 3.0, Easing::EaseOut)
            .move_to_with_ease(Vec2::new(1800.0, 550.0), 3.0, Easing::EaseOut)
            .end_parallel();
        scene.add(runner, draw);

        let (mut title, draw) = self.text(
            "RUNNING MAN",
            Presets::centered(TITLE_SIZE, self.screen, Color::INVISIBLE_WHITE),
        );
        title
            .timeline_mut()
            .delay(1.0)
            .fade_to_with_ease(1.0, 2.0, Easing::EaseIn)
            .delay(4.5)
            .fade_to_with_ease(0.0, 1.5, Easing::EaseOut);
        scene.add(title, draw);

        Ok(scene)
    }

    fn repeat_showcase(&self) -> Result<Scene> {
        let mut scene = Scene::new(SCENE_NAMES[2]);

        let (mut bouncer, draw) =
            self.sprite("background", VisualState::at(Vec2::new(100.0, 100.0)))?;
        bouncer
            .timeline_mut()
            .move_to(Vec2::new(400.0, 100.0), 1.0)
            .begin_repeat(RepeatMode::PingPong, RepeatCount::Times(3))
            .scale_to(Vec2::splat(1.5), 0.5)
            .rotate_to(45f32.to_radians(), 0.5)
            .fade_to(0.5, 0.5)
            .end_repeat()
            .move_to(Vec2::new(400.0, 400.0), 1.0);
        scene.add(bouncer, draw);

        let (mut square, draw) =
            self.sprite("background", VisualState::at(Vec2::new(500.0, 100.0)))?;
        square
            .timeline_mut()
            .begin_repeat(RepeatMode::Normal, RepeatCount::Times(2))
            .move_to(Vec2::new(700.0, 100.0), 0.5)
            .move_to(Vec2::new(700.0, 300.0), 0.5)
            .move_to(Vec2::new(500.0, 300.0), 0.5)
            .move_to(Vec2::new(500.0, 100.0), 0.5)
            .end_repeat()
            .scale_to(Vec2::splat(2.0), 1.0);
        scene.add(square, draw);

        Ok(scene)
    }
}

/// Build the demo sequence; fails if an asset the scenes use is missing
pub fn build_demo(assets: &AssetRegistry, screen: Vec2, sink: &DrawSink) -> Result<SceneSequencer> {
    let builder = SceneBuilder {
        assets,
        sink,
        screen,
    };

    Ok(SceneSequencer::new()
        .with(builder.kooler_presents()?)
        .with(builder.running_man()?)
        .with(builder.repeat_showcase()?))
}
