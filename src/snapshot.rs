//! Read-only serializable view of the whole simulation.
//!
//! Hosts render from this instead of poking at the ECS; it is rebuilt on
//! demand and owns its data, so it stays valid across later ticks.

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::Serialize;

use crate::components::circlecollider::CircleCollider;
use crate::components::customer::{Customer, CustomerState};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Carry, Player};
use crate::components::station::{Station, StationKind};
use crate::resources::progression::Progression;
use crate::resources::queue::CheckoutQueue;
use crate::resources::registry::StationRegistry;
use crate::resources::worldtime::WorldTime;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub carry: u32,
    pub carry_max: u32,
    pub cooldown: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StationView {
    pub kind: StationKind,
    pub label: String,
    pub stock: u32,
    pub capacity: u32,
    pub unlimited: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerView {
    pub pos: Vec2,
    pub state: CustomerState,
    pub has_item: bool,
    /// Position in the checkout line, front is 0; `None` when not queued.
    pub queue_slot: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShopSnapshot {
    pub elapsed: f32,
    pub frame: u64,
    pub cash: u32,
    pub xp: u32,
    pub xp_threshold: u32,
    pub level: u32,
    pub sale_value: u32,
    pub spawn_interval: f32,
    pub queue_len: usize,
    pub player: PlayerView,
    pub stations: Vec<StationView>,
    pub customers: Vec<CustomerView>,
}

impl ShopSnapshot {
    pub fn capture(world: &mut World) -> Self {
        let player = world
            .query::<(&MapPosition, &CircleCollider, &Player, &Carry)>()
            .single(world)
            .map(|(pos, collider, player, carry)| PlayerView {
                pos: pos.pos,
                radius: collider.radius,
                carry: carry.count,
                carry_max: carry.max,
                cooldown: player.cooldown,
            })
            .unwrap_or(PlayerView {
                pos: Vec2::ZERO,
                radius: 0.0,
                carry: 0,
                carry_max: 0,
                cooldown: 0.0,
            });

        let registry = world.resource::<StationRegistry>().clone();
        let stations = registry
            .all()
            .filter_map(|entity| world.get::<Station>(entity))
            .map(|s| StationView {
                kind: s.kind,
                label: s.label.clone(),
                stock: s.stock,
                capacity: s.capacity,
                unlimited: s.unlimited,
            })
            .collect();

        let queue = world.resource::<CheckoutQueue>().clone();
        let customers = world
            .query::<(Entity, &MapPosition, &Customer)>()
            .iter(world)
            .map(|(entity, pos, customer)| CustomerView {
                pos: pos.pos,
                state: customer.state,
                has_item: customer.has_item,
                queue_slot: queue.index_of(entity),
            })
            .collect();

        let time = world.resource::<WorldTime>();
        let progression = world.resource::<Progression>();
        ShopSnapshot {
            elapsed: time.elapsed,
            frame: time.frame_count,
            cash: progression.cash,
            xp: progression.xp,
            xp_threshold: progression.xp_threshold,
            level: progression.level,
            sale_value: progression.sale_value,
            spawn_interval: progression.spawn_interval,
            queue_len: queue.len(),
            player,
            stations,
            customers,
        }
    }
}
