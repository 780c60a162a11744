//! Scene timeline aggregation
//!
//! A scene is a set of animated entities that share one time origin. The
//! origin is latched when the scene starts; every tick draws each entity at
//! `now - origin`. The scene's length is the longest member timeline, read
//! once at start since timelines are fully authored by then.

use reel_core::{RenderHandle, VisualState};
use slotmap::{new_key_type, SlotMap};

use crate::entity::AnimatedEntity;

new_key_type! {
    /// Identifier of an entity within its scene
    pub struct EntityId;
}

/// Render callback invoked once per entity per tick
pub type DrawFn = Box<dyn FnMut(RenderHandle, &VisualState) + Send>;

struct SceneMember {
    entity: AnimatedEntity,
    draw: DrawFn,
}

/// Entities sharing a playback origin
pub struct Scene {
    name: String,
    members: SlotMap<EntityId, SceneMember>,
    /// Draw order (insertion order)
    order: Vec<EntityId>,
    start_time: f64,
    duration: f64,
    started: bool,
    ended: bool,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: SlotMap::with_key(),
            order: Vec::new(),
            start_time: 0.0,
            duration: 0.0,
            started: false,
            ended: false,
        }
    }

    /// Add an entity; entities draw in the order they were added
    pub fn add(&mut self, entity: AnimatedEntity, draw: DrawFn) -> EntityId {
        let id = self.members.insert(SceneMember { entity, draw });
        self.order.push(id);
        id
    }

    /// Builder: add an entity
    pub fn with(mut self, entity: AnimatedEntity, draw: DrawFn) -> Self {
        self.add(entity, draw);
        self
    }

    pub fn entity(&self, id: EntityId) -> Option<&AnimatedEntity> {
        self.members.get(id).map(|m| &m.entity)
    }

    /// Iterate entities in draw order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &AnimatedEntity)> {
        self.order
            .iter()
            .filter_map(|id| self.members.get(*id).map(|m| (*id, &m.entity)))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Latch the time origin and size the scene
    pub fn start(&mut self, now: f64) {
        self.start_time = now;
        self.duration = self
            .members
            .values()
            .map(|m| m.entity.duration())
            .fold(0.0, f64::max);
        self.started = true;
        self.ended = false;

        tracing::debug!(
            scene = %self.name,
            entities = self.members.len(),
            duration = self.duration,
            "scene started"
        );
    }

    /// Seconds since the scene started
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.start_time
    }

    /// Draw every entity at the current scene time
    pub fn tick(&mut self, now: f64) {
        if !self.started {
            return;
        }

        let elapsed = self.elapsed(now);
        for id in &self.order {
            if let Some(member) = self.members.get_mut(*id) {
                let state = member.entity.state_at(elapsed);
                tracing::trace!(scene = %self.name, handle = member.entity.handle().id(), elapsed, "draw");
                (member.draw)(member.entity.handle(), &state);
            }
        }

        if !self.ended && elapsed >= self.duration {
            self.ended = true;
            tracing::debug!(scene = %self.name, elapsed, "scene ended");
        }
    }

    /// States of every entity at `elapsed`, in draw order, without drawing
    pub fn sample(&self, elapsed: f64) -> Vec<(RenderHandle, VisualState)> {
        self.entities()
            .map(|(_, entity)| (entity.handle(), entity.state_at(elapsed)))
            .collect()
    }

    /// Length of the scene as latched by the last `start`
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Longest member timeline, regardless of whether the scene has started
    pub fn authored_duration(&self) -> f64 {
        self.members
            .values()
            .map(|m| m.entity.duration())
            .fold(0.0, f64::max)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.members.len())
            .field("start_time", &self.start_time)
            .field("duration", &self.duration)
            .field("started", &self.started)
            .field("ended", &self.ended)
            .finish()
    }
}
