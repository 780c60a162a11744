//! Scene sequencing
//!
//! Plays scenes back to back. When a scene ends the sequencer moves to the
//! next one but only starts it on the following tick, so the new scene's
//! origin is the time of its first drawn frame and none of the previous
//! scene's leftover time carries over. The last scene is never left: once it
//! ends the sequencer keeps drawing its final state.

use crate::error::{Result, SceneError};
use crate::scene::Scene;

/// Ordered list of scenes with a play cursor
#[derive(Debug)]
pub struct SceneSequencer {
    scenes: Vec<Scene>,
    current: usize,
    /// Set when the current scene has not been started yet
    pending_start: bool,
}

impl SceneSequencer {
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            current: 0,
            pending_start: true,
        }
    }

    /// Append a scene to the end of the sequence
    pub fn push(&mut self, scene: Scene) {
        self.scenes.push(scene);
    }

    /// Builder: append a scene
    pub fn with(mut self, scene: Scene) -> Self {
        self.push(scene);
        self
    }

    /// Start the current scene if needed, draw it, and advance when it ends
    pub fn tick(&mut self, now: f64) {
        let count = self.scenes.len();
        let Some(scene) = self.scenes.get_mut(self.current) else {
            return;
        };

        if self.pending_start {
            scene.start(now);
            self.pending_start = false;
            tracing::info!(
                index = self.current,
                scene = scene.name(),
                duration = scene.duration(),
                "starting scene"
            );
        }

        scene.tick(now);

        if scene.is_ended() && self.current + 1 < count {
            self.current += 1;
            self.pending_start = true;
        }
    }

    /// Whether the last scene has played to its end
    pub fn is_finished(&self) -> bool {
        match self.scenes.last() {
            Some(last) => self.current + 1 == self.scenes.len() && last.is_ended(),
            None => true,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Scene> {
        self.scenes.get(self.current)
    }

    pub fn scene(&self, index: usize) -> Result<&Scene> {
        self.scenes.get(index).ok_or(SceneError::SceneIndex {
            index,
            len: self.scenes.len(),
        })
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Sum of every scene's authored length
    pub fn total_duration(&self) -> f64 {
        self.scenes.iter().map(Scene::authored_duration).sum()
    }
}

impl Default for SceneSequencer {
    fn default() -> Self {
        Self::new()
    }
}
