//! Configured ordering of the station entities.
//!
//! Shelves keep their layout order; register checkout scans them
//! front-to-back in exactly this order when looking for stock.

use bevy_ecs::prelude::{Entity, Resource};

#[derive(Resource, Debug, Clone)]
pub struct StationRegistry {
    pub crate_station: Entity,
    pub shelves: Vec<Entity>,
    pub register: Entity,
}

impl StationRegistry {
    /// All stations in configured order: crate, shelves, register.
    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        std::iter::once(self.crate_station)
            .chain(self.shelves.iter().copied())
            .chain(std::iter::once(self.register))
    }
}
