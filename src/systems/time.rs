//! Time update.
//!
//! Advances the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! once per tick. The incoming delta is capped at `SimConfig::max_dt` before
//! scaling, so a long host frame cannot tunnel entities through collision
//! geometry or skip interaction cooldowns.

use bevy_ecs::prelude::*;

use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Cap, scale, and accumulate the tick delta.
///
/// `dt` is the unscaled host delta in seconds. Negative deltas are treated
/// as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let max_dt = world.resource::<SimConfig>().max_dt;
    let mut wt = world.resource_mut::<WorldTime>();
    let capped = dt.clamp(0.0, max_dt);
    let scaled = capped * wt.time_scale;
    wt.elapsed += scaled;
    wt.delta = scaled;
    wt.frame_count += 1;
}
