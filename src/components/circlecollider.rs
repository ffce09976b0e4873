use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::rect::Rect;

/// Circular collision shape centered on the entity's [`MapPosition`].
///
/// Moving entities (player, customers) use circles; the static world geometry
/// is made of [`Rect`] solids. Overlap resolution lives in
/// [`crate::systems::movement`].
///
/// [`MapPosition`]: super::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct CircleCollider {
    pub radius: f32,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    /// Whether a circle at `center` overlaps the rectangle.
    ///
    /// Touching exactly at the radius counts as resolved, not overlapping,
    /// so resolution is idempotent.
    pub fn overlaps_rect(&self, center: Vec2, rect: &Rect) -> bool {
        rect.distance_to(center) < self.radius
    }
}
