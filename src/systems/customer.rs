//! Customer arrival and the per-customer state machine.
//!
//! Spawning is a simulation-time countdown, never a task: the timer is
//! decremented by the tick's delta and an elapsed attempt either spawns a
//! customer or is skipped by gating, but always re-arms the countdown.
//! Every customer advances through the closed state machine on
//! [`Customer`], moving with the same collision resolution as the player.

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::circlecollider::CircleCollider;
use crate::components::customer::{Customer, CustomerState};
use crate::components::mapposition::MapPosition;
use crate::components::station::{Station, StockActor};
use crate::events::customer::{CustomerDepartedEvent, CustomerSpawnedEvent};
use crate::rect::Rect;
use crate::resources::progression::Progression;
use crate::resources::queue::CheckoutQueue;
use crate::resources::registry::StationRegistry;
use crate::resources::rng::SimRng;
use crate::resources::simconfig::SimConfig;
use crate::resources::spawner::CustomerSpawner;
use crate::resources::worldmap::WorldMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::movement::steer_toward;

/// How far below a shelf a customer stands to browse it.
const PICKUP_STANDOFF: f32 = 16.0;
/// The doorway sits flush with the wall solids, so a leaving customer
/// counts as out once within this distance of the exit point.
const EXIT_REACH: f32 = 10.0;
/// Smallest delay between spawn attempts, whatever the jitter draws.
const MIN_SPAWN_DELAY: f32 = 0.1;

/// Spawning is allowed only while some shelf is stocked and the shop is
/// not already at queue capacity, counting every live customer.
pub fn can_spawn(live_customers: usize, queue_capacity: usize, any_shelf_stocked: bool) -> bool {
    any_shelf_stocked && live_customers < queue_capacity
}

/// Next countdown: the progression-scaled mean, jittered, clamped positive.
pub fn next_spawn_delay(rng: &mut SimRng, mean: f32, jitter: f32) -> f32 {
    (mean + rng.range_f32(-jitter, jitter)).max(MIN_SPAWN_DELAY)
}

/// Browsing spot for a shelf: centered below its rectangle.
pub fn shelf_standoff(rect: &Rect) -> Vec2 {
    Vec2::new(rect.x + rect.w * 0.5, rect.y + rect.h + PICKUP_STANDOFF)
}

pub fn customer_spawn(
    mut commands: Commands,
    customers: Query<&Customer>,
    stations: Query<&Station>,
    registry: Res<StationRegistry>,
    map: Res<WorldMap>,
    queue: Res<CheckoutQueue>,
    mut spawner: ResMut<CustomerSpawner>,
    mut rng: ResMut<SimRng>,
    progression: Res<Progression>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
    mut spawned: MessageWriter<CustomerSpawnedEvent>,
) {
    spawner.timer -= time.delta;
    if spawner.timer > 0.0 {
        return;
    }
    // The attempt is consumed whether or not gating lets it through.
    spawner.timer = next_spawn_delay(&mut rng, progression.spawn_interval, config.spawn_jitter);

    let stocked: SmallVec<[Entity; 4]> = registry
        .shelves
        .iter()
        .copied()
        .filter(|&e| stations.get(e).map(|s| s.has_stock()).unwrap_or(false))
        .collect();
    let live = customers.iter().count();
    if !can_spawn(live, queue.capacity, !stocked.is_empty()) {
        log::debug!("spawn attempt skipped: live={live} stocked_shelves={}", stocked.len());
        return;
    }

    let &target_shelf = rng.pick(&stocked).unwrap_or(&stocked[0]);
    let speed = rng.range_f32(config.customer_speed_min, config.customer_speed_max);
    let label = stations
        .get(target_shelf)
        .map(|s| s.label.clone())
        .unwrap_or_default();
    commands.spawn((
        MapPosition::new(map.entrance),
        CircleCollider {
            radius: config.customer_radius,
        },
        Customer::new(target_shelf, speed),
    ));
    log::debug!("customer spawned toward {label} at {:.0} u/s", speed);
    spawned.write(CustomerSpawnedEvent {
        target_shelf: label,
    });
}

/// Advance every customer's state machine by one tick.
pub fn customer_ai(
    mut commands: Commands,
    mut customers: Query<(Entity, &mut MapPosition, &CircleCollider, &mut Customer)>,
    mut stations: Query<&mut Station>,
    registry: Res<StationRegistry>,
    mut queue: ResMut<CheckoutQueue>,
    map: Res<WorldMap>,
    mut rng: ResMut<SimRng>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
    mut departed: MessageWriter<CustomerDepartedEvent>,
) {
    let dt = time.delta;
    for (entity, mut position, collider, mut customer) in customers.iter_mut() {
        match customer.state {
            CustomerState::Spawning => {
                customer.transition(CustomerState::ToShelf);
            }
            CustomerState::ToShelf => {
                let Ok(shelf) = stations.get(customer.target_shelf) else {
                    customer.transition(CustomerState::Leaving);
                    continue;
                };
                let target = shelf_standoff(&shelf.rect);
                if steer_toward(
                    &mut position.pos,
                    target,
                    customer.speed,
                    dt,
                    collider.radius,
                    &map,
                    config.arrive_eps,
                ) {
                    customer.transition(CustomerState::AcquireItem);
                }
            }
            CustomerState::AcquireItem => {
                let took = stations
                    .get_mut(customer.target_shelf)
                    .map(|mut shelf| shelf.withdraw(1, StockActor::Customer))
                    .unwrap_or(0);
                if took == 1 {
                    customer.has_item = true;
                    if queue.push_back(entity) {
                        customer.transition(CustomerState::ToQueue);
                    } else {
                        // No room in line; the pick goes back on the shelf
                        // and they walk out unserved.
                        if let Ok(mut shelf) = stations.get_mut(customer.target_shelf) {
                            shelf.deposit(1, StockActor::Customer);
                        }
                        customer.has_item = false;
                        customer.transition(CustomerState::Leaving);
                    }
                } else {
                    // Shelf ran dry since they set out. Try another stocked
                    // shelf, or give up.
                    let stocked: SmallVec<[Entity; 4]> = registry
                        .shelves
                        .iter()
                        .copied()
                        .filter(|&e| {
                            e != customer.target_shelf
                                && stations.get(e).map(|s| s.has_stock()).unwrap_or(false)
                        })
                        .collect();
                    match rng.pick(&stocked) {
                        Some(&next) => {
                            customer.target_shelf = next;
                            customer.transition(CustomerState::ToShelf);
                        }
                        None => {
                            customer.transition(CustomerState::Leaving);
                        }
                    }
                }
            }
            CustomerState::ToQueue => {
                let Some(index) = queue.index_of(entity) else {
                    customer.transition(CustomerState::Leaving);
                    continue;
                };
                if steer_toward(
                    &mut position.pos,
                    queue.slot_position(index),
                    customer.speed,
                    dt,
                    collider.radius,
                    &map,
                    config.arrive_eps,
                ) {
                    customer.transition(CustomerState::Waiting);
                }
            }
            CustomerState::Waiting => {
                let Some(index) = queue.index_of(entity) else {
                    customer.transition(CustomerState::Leaving);
                    continue;
                };
                // The line compacts; everyone shuffles up to their slot.
                let at_slot = steer_toward(
                    &mut position.pos,
                    queue.slot_position(index),
                    customer.speed,
                    dt,
                    collider.radius,
                    &map,
                    config.arrive_eps,
                );
                if index == 0 && at_slot {
                    customer.transition(CustomerState::AtRegister);
                }
            }
            CustomerState::AtRegister => {
                // Keep pressing toward the checkout point until the player
                // rings them up; the slot may still be a few steps away if
                // the line compacted mid-walk.
                steer_toward(
                    &mut position.pos,
                    queue.slot_position(0),
                    customer.speed,
                    dt,
                    collider.radius,
                    &map,
                    config.arrive_eps,
                );
            }
            CustomerState::Leaving => {
                queue.remove(entity);
                if steer_toward(
                    &mut position.pos,
                    map.exit,
                    customer.speed,
                    dt,
                    collider.radius,
                    &map,
                    EXIT_REACH,
                ) {
                    customer.transition(CustomerState::Removed);
                    departed.write(CustomerDepartedEvent {
                        served: customer.has_item,
                    });
                    commands.entity(entity).despawn();
                }
            }
            CustomerState::Removed => {
                commands.entity(entity).despawn();
            }
        }
    }
}
