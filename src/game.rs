//! The embeddable simulation session.
//!
//! [`ShopSim`] owns the ECS [`World`] and the fixed tick schedule. A host
//! pushes raw input, calls [`ShopSim::tick`] with a wall-clock delta, and
//! reads back [`SimEvent`]s and [`ShopSnapshot`]s. Construction is
//! fail-fast: config and layout are validated before anything is spawned.

use bevy_ecs::message::Messages;
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::circlecollider::CircleCollider;
use crate::components::customer::Customer;
use crate::components::mapposition::MapPosition;
use crate::components::player::{Carry, Player};
use crate::components::station::{Station, StationKind};
use crate::events::customer::{CustomerDepartedEvent, CustomerSpawnedEvent};
use crate::events::progression::LevelUpEvent;
use crate::events::transfer::{PickupEvent, SaleEvent, StockEvent};
use crate::events::SimEvent;
use crate::resources::input::{HeldKeys, MoveVector, PointerDrag, RawInput};
use crate::resources::layout::ShopLayout;
use crate::resources::progression::Progression;
use crate::resources::queue::CheckoutQueue;
use crate::resources::registry::StationRegistry;
use crate::resources::rng::SimRng;
use crate::resources::simconfig::{SetupError, SimConfig};
use crate::resources::spawner::CustomerSpawner;
use crate::resources::worldmap::WorldMap;
use crate::resources::worldtime::WorldTime;
use crate::snapshot::ShopSnapshot;
use crate::systems::customer::{customer_ai, customer_spawn};
use crate::systems::input::normalize_input;
use crate::systems::interaction::auto_interact;
use crate::systems::movement::player_movement;
use crate::systems::progression::apply_progression;
use crate::systems::time::update_world_time;

/// Bevy ECS' [`Messages`] queues need `update()` once per frame so drained
/// or unread messages age out after two frames instead of accumulating.
fn update_message_queues(
    mut pickups: ResMut<Messages<PickupEvent>>,
    mut stocks: ResMut<Messages<StockEvent>>,
    mut sales: ResMut<Messages<SaleEvent>>,
    mut levels: ResMut<Messages<LevelUpEvent>>,
    mut spawns: ResMut<Messages<CustomerSpawnedEvent>>,
    mut departures: ResMut<Messages<CustomerDepartedEvent>>,
) {
    pickups.update();
    stocks.update();
    sales.update();
    levels.update();
    spawns.update();
    departures.update();
}

pub struct ShopSim {
    world: World,
    schedule: Schedule,
}

impl ShopSim {
    pub fn new(config: SimConfig, layout: ShopLayout, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        layout.validate()?;

        let mut world = World::new();
        world.init_resource::<Messages<PickupEvent>>();
        world.init_resource::<Messages<StockEvent>>();
        world.init_resource::<Messages<SaleEvent>>();
        world.init_resource::<Messages<LevelUpEvent>>();
        world.init_resource::<Messages<CustomerSpawnedEvent>>();
        world.init_resource::<Messages<CustomerDepartedEvent>>();

        let crate_station = world
            .spawn(match layout.crate_zone.stock {
                None => Station::unlimited(StationKind::Crate, "Crate", layout.crate_zone.rect),
                Some(stock) => {
                    Station::new(StationKind::Crate, "Crate", layout.crate_zone.rect, stock)
                        .with_stock(stock)
                }
            })
            .id();
        let shelves: Vec<Entity> = layout
            .shelves
            .iter()
            .map(|zone| {
                world
                    .spawn(Station::new(
                        StationKind::Shelf,
                        zone.label.clone(),
                        zone.rect,
                        zone.capacity,
                    ))
                    .id()
            })
            .collect();
        let register = world
            .spawn(Station::new(
                StationKind::Register,
                "Register",
                layout.register,
                0,
            ))
            .id();

        world.spawn((
            MapPosition::new(layout.player_start),
            CircleCollider {
                radius: config.player_radius,
            },
            Player::default(),
            Carry::new(config.carry_max),
        ));

        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(RawInput::default());
        world.insert_resource(MoveVector::default());
        world.insert_resource(WorldMap {
            bounds: layout.bounds,
            solids: layout.solids.clone(),
            entrance: layout.entrance,
            exit: layout.exit,
        });
        world.insert_resource(CheckoutQueue::new(
            config.queue_capacity,
            layout.queue_base,
            layout.queue_gap,
        ));
        world.insert_resource(StationRegistry {
            crate_station,
            shelves,
            register,
        });
        world.insert_resource(Progression::new(&config));
        world.insert_resource(SimRng::seeded(seed));
        world.insert_resource(CustomerSpawner::default());
        world.insert_resource(config);

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                normalize_input,
                player_movement,
                auto_interact,
                customer_spawn,
                customer_ai,
                apply_progression,
                update_message_queues,
            )
                .chain(),
        );

        log::info!("session ready: seed={seed}");
        Ok(Self { world, schedule })
    }

    /// Advance the simulation by `dt` seconds of wall-clock time.
    ///
    /// The delta is capped and scaled inside; large stalls never produce a
    /// tunnel-through step.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        let mut input = self.world.resource_mut::<RawInput>();
        input.pointer = PointerDrag {
            active: true,
            anchor: at,
            current: at,
        };
    }

    pub fn pointer_move(&mut self, to: Vec2) {
        let mut input = self.world.resource_mut::<RawInput>();
        if input.pointer.active {
            input.pointer.current = to;
        }
    }

    pub fn pointer_up(&mut self) {
        self.world.resource_mut::<RawInput>().pointer.active = false;
    }

    pub fn set_keys(&mut self, keys: HeldKeys) {
        self.world.resource_mut::<RawInput>().keys = keys;
    }

    /// Raw stick axes in [-1,1]²; the deadzone is applied during
    /// normalization.
    pub fn set_gamepad(&mut self, axes: Vec2) {
        self.world.resource_mut::<RawInput>().gamepad = axes;
    }

    /// Collect every notification buffered since the last drain, oldest
    /// first within each kind.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        let mut out = Vec::new();
        out.extend(
            self.world
                .resource_mut::<Messages<PickupEvent>>()
                .drain()
                .map(SimEvent::Pickup),
        );
        out.extend(
            self.world
                .resource_mut::<Messages<StockEvent>>()
                .drain()
                .map(SimEvent::Stock),
        );
        out.extend(
            self.world
                .resource_mut::<Messages<SaleEvent>>()
                .drain()
                .map(SimEvent::Sale),
        );
        out.extend(
            self.world
                .resource_mut::<Messages<LevelUpEvent>>()
                .drain()
                .map(SimEvent::LevelUp),
        );
        out.extend(
            self.world
                .resource_mut::<Messages<CustomerSpawnedEvent>>()
                .drain()
                .map(SimEvent::CustomerSpawned),
        );
        out.extend(
            self.world
                .resource_mut::<Messages<CustomerDepartedEvent>>()
                .drain()
                .map(SimEvent::CustomerDeparted),
        );
        out
    }

    pub fn snapshot(&mut self) -> ShopSnapshot {
        ShopSnapshot::capture(&mut self.world)
    }

    /// Number of live customers, whatever their state.
    pub fn customer_count(&mut self) -> usize {
        self.world.query::<&Customer>().iter(&self.world).count()
    }

    /// Escape hatch for tests and advanced hosts.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_validates_config() {
        let mut config = SimConfig::default();
        config.player_speed = 0.0;
        assert!(ShopSim::new(config, ShopLayout::default(), 1).is_err());
    }

    #[test]
    fn construction_validates_layout() {
        let mut layout = ShopLayout::default();
        layout.shelves.clear();
        assert!(matches!(
            ShopSim::new(SimConfig::default(), layout, 1),
            Err(SetupError::NoShelves)
        ));
    }

    #[test]
    fn default_session_spawns_player_and_stations() {
        let mut sim = ShopSim::new(SimConfig::default(), ShopLayout::default(), 42).unwrap();
        let snap = sim.snapshot();
        // crate + three shelves + register
        assert_eq!(snap.stations.len(), 5);
        assert_eq!(snap.player.carry, 0);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.cash, 0);
    }

    #[test]
    fn tick_advances_time_with_capped_delta() {
        let mut sim = ShopSim::new(SimConfig::default(), ShopLayout::default(), 42).unwrap();
        sim.tick(10.0);
        let snap = sim.snapshot();
        assert!(snap.elapsed <= SimConfig::default().max_dt + f32::EPSILON);
        assert_eq!(snap.frame, 1);
    }
}
