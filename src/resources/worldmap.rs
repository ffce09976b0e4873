//! Static world geometry: bounds, solid rectangles, and the fixed points
//! customers walk to. Read-only after setup.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::rect::Rect;

/// Bounds and collision geometry of the shop floor.
///
/// `solids` keeps declaration order; collision resolution iterates it
/// sequentially, so the order is part of the simulation's determinism.
#[derive(Resource, Debug, Clone)]
pub struct WorldMap {
    pub bounds: Rect,
    pub solids: Vec<Rect>,
    /// Where customers appear.
    pub entrance: Vec2,
    /// Where leaving customers despawn.
    pub exit: Vec2,
}

impl WorldMap {
    /// Total shelf-independent clamp of a point into the bounds.
    pub fn clamp_to_bounds(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.bounds.x, self.bounds.x + self.bounds.w),
            p.y.clamp(self.bounds.y, self.bounds.y + self.bounds.h),
        )
    }
}
