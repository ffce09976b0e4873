use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}

impl From<Vec2> for MapPosition {
    fn from(pos: Vec2) -> Self {
        Self { pos }
    }
}
