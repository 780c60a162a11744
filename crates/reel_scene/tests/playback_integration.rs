//! Integration tests for timelines + scenes + sequencing
//!
//! These tests verify that:
//! - Scenes draw their entities at the shared scene time
//! - The sequencer hands off between scenes with a fresh time origin
//! - Timelines can be evaluated from several threads once authored

use reel_animation::{Easing, RepeatCount, RepeatMode, Timeline};
use reel_core::{Color, RenderHandle, Vec2, VisualState};
use reel_scene::{AnimatedEntity, Clock, DrawFn, ManualClock, Scene, SceneSequencer};
use std::sync::{Arc, Mutex};

type Frames = Arc<Mutex<Vec<(String, RenderHandle, VisualState)>>>;

fn tagged(frames: &Frames, tag: &str) -> DrawFn {
    let frames = frames.clone();
    let tag = tag.to_string();
    Box::new(move |handle, state| {
        frames.lock().unwrap().push((tag.clone(), handle, *state));
    })
}

fn hold(handle: i32, seconds: f64) -> AnimatedEntity {
    let mut entity = AnimatedEntity::new(RenderHandle(handle), VisualState::default());
    entity.timeline_mut().move_to(Vec2::new(seconds as f32, 0.0), seconds);
    entity
}

/// Scene A lasts 5s, scene B 3s; B must start from zero on the tick after A ends
#[test]
fn test_sequencer_hands_off_with_fresh_origin() {
    let frames = Frames::default();
    let mut seq = SceneSequencer::new()
        .with(Scene::new("a").with(hold(1, 5.0), tagged(&frames, "a")))
        .with(Scene::new("b").with(hold(2, 3.0), tagged(&frames, "b")));

    let clock = ManualClock::new(100.0);
    let dt = 1.0 / 60.0;

    // Run until A has ended
    seq.tick(clock.now());
    while seq.current_index() == 0 {
        clock.advance(dt);
        seq.tick(clock.now());
    }
    let a_end = clock.now();
    assert!(a_end - 100.0 >= 5.0);

    // The very next tick starts B at elapsed 0
    clock.advance(dt);
    let b_start = clock.now();
    seq.tick(b_start);

    let b_scene = seq.current().unwrap();
    assert_eq!(b_scene.name(), "b");
    assert_eq!(b_scene.elapsed(b_start), 0.0);

    let last = frames.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.0, "b");
    assert_eq!(last.2.position, Vec2::ZERO);

    // Finish B and idle on its final frame
    clock.advance(3.5);
    seq.tick(clock.now());
    assert!(seq.is_finished());
    clock.advance(10.0);
    seq.tick(clock.now());
    let last = frames.lock().unwrap().last().cloned().unwrap();
    assert_eq!(last.2.position, Vec2::new(3.0, 0.0));
}

/// The move → delay → fade scenario drawn through a scene
#[test]
fn test_scene_draws_authored_states() {
    let frames = Frames::default();
    let mut sprite = AnimatedEntity::new(RenderHandle(9), VisualState::at(Vec2::new(100.0, 100.0)));
    sprite
        .timeline_mut()
        .move_to(Vec2::new(400.0, 100.0), 1.0)
        .delay(1.0)
        .fade_to(0.5, 0.5);

    let mut scene = Scene::new("scenario").with(sprite, tagged(&frames, "s"));
    scene.start(0.0);
    assert_eq!(scene.duration(), 2.5);

    for t in [0.5, 1.0, 2.25, 2.5, 4.0] {
        scene.tick(t);
    }

    let states: Vec<VisualState> = frames.lock().unwrap().iter().map(|f| f.2).collect();
    assert_eq!(states[0].position, Vec2::new(250.0, 100.0));
    assert_eq!(states[0].color.a, 1.0);
    assert_eq!(states[1].position, Vec2::new(400.0, 100.0));
    assert!((states[2].color.a - 0.75).abs() < 1e-5);
    assert!((states[3].color.a - 0.5).abs() < 1e-5);
    assert_eq!(states[3], states[4]);
    assert!(scene.is_ended());
}

/// The scene length ignores extra cycles of an indefinite repeat
#[test]
fn test_indefinite_repeat_is_sized_by_other_entities() {
    let mut spinner = AnimatedEntity::new(RenderHandle(1), VisualState::default());
    spinner
        .timeline_mut()
        .begin_repeat(RepeatMode::Normal, RepeatCount::Indefinite)
        .rotate_to(std::f32::consts::TAU, 1.0)
        .end_repeat();

    let mut scene = Scene::new("spin")
        .with(spinner, Box::new(|_, _| {}))
        .with(hold(2, 4.0), Box::new(|_, _| {}));
    scene.start(0.0);

    assert_eq!(scene.duration(), 4.0);
    let spinning = scene.sample(3.5);
    assert!((spinning[0].1.rotation - std::f32::consts::PI).abs() < 1e-4);
}

/// Authored timelines are plain data and can be sampled from many threads
#[test]
fn test_concurrent_evaluation_matches_serial() {
    let mut tl = Timeline::new(VisualState::default().with_color(Color::INVISIBLE_WHITE));
    tl.begin_parallel()
        .fade_to_with_ease(1.0, 1.0, Easing::EaseOut)
        .scale_to_with_ease(Vec2::splat(2.0), 2.0, Easing::Elastic)
        .end_parallel()
        .begin_repeat(RepeatMode::PingPong, RepeatCount::Times(3))
        .move_to_with_ease(Vec2::new(50.0, 50.0), 0.5, Easing::Bounce)
        .flip()
        .end_repeat();

    let times: Vec<f64> = (0..200).map(|i| i as f64 * 0.02).collect();
    let serial: Vec<VisualState> = times.iter().map(|t| tl.state_at(*t)).collect();

    let parallel: Vec<Vec<VisualState>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| times.iter().map(|t| tl.state_at(*t)).collect::<Vec<_>>()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for run in parallel {
        assert_eq!(run, serial);
    }
}
