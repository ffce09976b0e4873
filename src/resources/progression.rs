//! Progression state: xp, cash, level, and the level-scaled tuning values.
//!
//! Threshold rollover and level-up side effects are applied by
//! [`crate::systems::progression::apply_progression`]; this resource only
//! holds the explicit state (no hidden globals).

use bevy_ecs::prelude::Resource;

use crate::resources::simconfig::SimConfig;

#[derive(Resource, Debug, Clone)]
pub struct Progression {
    pub xp: u32,
    pub xp_threshold: u32,
    pub cash: u32,
    pub level: u32,
    /// Flat bonus added to every sale price; grows by one per level.
    pub sale_value: u32,
    /// Mean customer spawn interval in seconds; shrinks per level down to
    /// the configured floor.
    pub spawn_interval: f32,
}

impl Progression {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            xp: 0,
            xp_threshold: config.xp_threshold,
            cash: 0,
            level: 1,
            sale_value: 0,
            spawn_interval: config.spawn_interval,
        }
    }
}
