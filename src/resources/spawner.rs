//! Customer spawn countdown.
//!
//! A plain simulation-time counter, decremented each tick by
//! [`crate::systems::customer::customer_spawn`]; never a concurrent task.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy)]
pub struct CustomerSpawner {
    /// Seconds until the next spawn attempt.
    pub timer: f32,
}

impl Default for CustomerSpawner {
    fn default() -> Self {
        // First attempt fires immediately once gating allows it.
        Self { timer: 0.0 }
    }
}
