//! Animated entities

use reel_animation::Timeline;
use reel_core::{RenderHandle, VisualState};

/// A drawable thing and the timeline that animates it
#[derive(Clone, Debug)]
pub struct AnimatedEntity {
    handle: RenderHandle,
    timeline: Timeline,
}

impl AnimatedEntity {
    pub fn new(handle: RenderHandle, initial: VisualState) -> Self {
        Self {
            handle,
            timeline: Timeline::new(initial),
        }
    }

    /// Reset the timeline to `initial` and return it for authoring
    pub fn init(&mut self, initial: VisualState) -> &mut Timeline {
        self.timeline.init(initial)
    }

    pub fn handle(&self) -> RenderHandle {
        self.handle
    }

    pub fn set_handle(&mut self, handle: RenderHandle) {
        self.handle = handle;
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    /// State `elapsed` seconds into the owning scene
    pub fn state_at(&self, elapsed: f64) -> VisualState {
        self.timeline.state_at(elapsed)
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_core::{Color, Vec2};

    #[test]
    fn test_init_returns_authoring_timeline() {
        let mut entity = AnimatedEntity::new(RenderHandle(3), VisualState::default());
        entity
            .init(VisualState::default().with_color(Color::INVISIBLE_WHITE))
            .delay(1.0)
            .fade_to(1.0, 2.0);

        assert_eq!(entity.handle(), RenderHandle(3));
        assert_eq!(entity.duration(), 3.0);
        assert_eq!(entity.state_at(0.0).color.a, 0.0);
        assert_eq!(entity.state_at(3.0).color.a, 1.0);
    }

    #[test]
    fn test_entity_clones_are_independent() {
        let mut a = AnimatedEntity::new(RenderHandle(1), VisualState::default());
        a.timeline_mut().move_to(Vec2::new(10.0, 0.0), 1.0);
        let mut b = a.clone();
        b.timeline_mut().delay(5.0);
        assert_eq!(a.duration(), 1.0);
        assert_eq!(b.duration(), 6.0);
    }
}
