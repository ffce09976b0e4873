//! Player movement integration and collision resolution.
//!
//! Positions integrate by the smoothed movement vector; penetration against
//! the world's solid rectangles resolves by pushing the circle out along the
//! axis of minimum penetration. Solids are processed in declaration order,
//! sequentially, and resolution is idempotent: a valid position is left
//! untouched.

use bevy_ecs::prelude::*;

use glam::Vec2;

use crate::components::circlecollider::CircleCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::rect::Rect;
use crate::resources::input::MoveVector;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldmap::WorldMap;
use crate::resources::worldtime::WorldTime;

/// Push a circle at `pos` out of `rect` along the axis of minimum
/// penetration. Returns the corrected position; a non-overlapping position
/// comes back unchanged.
///
/// The four candidate depths (push left/right/up/down) are all positive
/// whenever the circle overlaps, and the comparison is closed-form, so the
/// degenerate center-on-edge and center-inside cases need no special path
/// and no vector is ever normalized.
pub fn resolve_circle_rect(pos: Vec2, radius: f32, rect: &Rect) -> Vec2 {
    if rect.distance_to(pos) >= radius {
        return pos;
    }
    let min = rect.min();
    let max = rect.max();
    let left = (pos.x + radius) - min.x;
    let right = max.x - (pos.x - radius);
    let up = (pos.y + radius) - min.y;
    let down = max.y - (pos.y - radius);

    let mut best = left;
    let mut push = Vec2::new(-left, 0.0);
    if right < best {
        best = right;
        push = Vec2::new(right, 0.0);
    }
    if up < best {
        best = up;
        push = Vec2::new(0.0, -up);
    }
    if down < best {
        push = Vec2::new(0.0, down);
    }
    pos + push
}

/// Resolve a position against every solid in declaration order, then clamp
/// into the world bounds.
pub fn resolve_against_world(pos: Vec2, radius: f32, map: &WorldMap) -> Vec2 {
    let mut pos = pos;
    for solid in &map.solids {
        pos = resolve_circle_rect(pos, radius, solid);
    }
    map.clamp_to_bounds(pos)
}

/// Move `pos` toward `target` at `speed`, resolving against the world's
/// solids on the way. Returns true once within `eps` of the target.
pub fn steer_toward(
    pos: &mut Vec2,
    target: Vec2,
    speed: f32,
    dt: f32,
    radius: f32,
    map: &WorldMap,
    eps: f32,
) -> bool {
    let to_target = target - *pos;
    let dist = to_target.length();
    if dist < eps {
        return true;
    }
    let step = to_target / dist * speed * dt;
    *pos = resolve_against_world(*pos + step, radius, map);
    false
}

/// Integrate the controlled entity by the normalized movement vector and
/// resolve collisions.
pub fn player_movement(
    mut query: Query<(&mut MapPosition, &CircleCollider), With<Player>>,
    move_vector: Res<MoveVector>,
    map: Res<WorldMap>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
) {
    for (mut position, collider) in query.iter_mut() {
        let next = position.pos + move_vector.value * config.player_speed * time.delta;
        position.pos = resolve_against_world(next, collider.radius, &map);
    }
}
