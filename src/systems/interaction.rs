//! Player-triggered station interactions.
//!
//! Once per tick the dispatcher decays the player's cooldown and, when the
//! gate is open, tries the stations the player stands near: crate pickup,
//! then shelf stocking in configured shelf order, then register checkout.
//! The first successful transfer re-arms the cooldown; everything that
//! cannot proceed leaves all state untouched and reports a typed
//! [`TransferResult::Blocked`] outcome. Nothing in this module panics.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::customer::{Customer, CustomerState};
use crate::components::mapposition::MapPosition;
use crate::components::player::{Carry, Player};
use crate::components::station::{Station, StockActor};
use crate::events::transfer::{PickupEvent, SaleEvent, StockEvent};
use crate::rect::Rect;
use crate::resources::progression::Progression;
use crate::resources::queue::CheckoutQueue;
use crate::resources::registry::StationRegistry;
use crate::resources::rng::SimRng;
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Why a transfer attempt did not happen. State is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The receiving side is at capacity.
    Full,
    /// The giving side has nothing to give.
    Empty,
    /// No checked-in customer is ready at the register.
    NoCustomer,
    /// The interaction cooldown has not elapsed yet.
    Cooldown,
    /// The entity is not near the station.
    OutOfRange,
}

/// Outcome of a transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferResult {
    PickedUp { amount: u32 },
    Stocked { amount: u32 },
    Sold { price: u32 },
    Blocked(BlockReason),
}

/// Proximity test: the entity is near a station when its center is within
/// the interaction radius of the station rectangle expanded by the pad.
pub fn near_station(pos: Vec2, rect: &Rect, config: &SimConfig) -> bool {
    rect.expand(config.station_pad).distance_to(pos) <= config.interact_radius
}

/// The dispatcher's gate: cooldown first, then proximity.
pub fn gate(cooldown: f32, pos: Vec2, rect: &Rect, config: &SimConfig) -> Option<BlockReason> {
    if cooldown > 0.0 {
        Some(BlockReason::Cooldown)
    } else if !near_station(pos, rect, config) {
        Some(BlockReason::OutOfRange)
    } else {
        None
    }
}

/// Move up to `batch` units from the crate into the carry.
pub fn try_pickup(carry: &mut Carry, station: &mut Station, batch: u32) -> TransferResult {
    if carry.is_full() {
        return TransferResult::Blocked(BlockReason::Full);
    }
    if !station.has_stock() {
        return TransferResult::Blocked(BlockReason::Empty);
    }
    let amount = station.withdraw(batch.min(carry.room()), StockActor::Player);
    if amount == 0 {
        return TransferResult::Blocked(BlockReason::Empty);
    }
    carry.count += amount;
    TransferResult::PickedUp { amount }
}

/// Move up to the whole carry onto a shelf.
pub fn try_stock(carry: &mut Carry, shelf: &mut Station) -> TransferResult {
    if carry.count == 0 {
        return TransferResult::Blocked(BlockReason::Empty);
    }
    if shelf.room() == 0 {
        return TransferResult::Blocked(BlockReason::Full);
    }
    let amount = shelf.deposit(carry.count, StockActor::Player);
    carry.count -= amount;
    TransferResult::Stocked { amount }
}

/// Check out the front-of-queue customer: one unit from the first stocked
/// shelf in configured order, priced from the seeded rng plus the
/// progression sale bonus. The customer is popped and sent leaving; cash
/// and xp are applied downstream by the progression pass.
pub fn try_checkout(
    stations: &mut Query<&mut Station>,
    customers: &mut Query<&mut Customer>,
    registry: &StationRegistry,
    queue: &mut CheckoutQueue,
    rng: &mut SimRng,
    progression: &Progression,
    config: &SimConfig,
) -> TransferResult {
    let Some(front) = queue.front() else {
        return TransferResult::Blocked(BlockReason::NoCustomer);
    };
    let Ok(mut customer) = customers.get_mut(front) else {
        // Stale entry; drop it and report, nothing else changed.
        queue.remove(front);
        return TransferResult::Blocked(BlockReason::NoCustomer);
    };
    if customer.state != CustomerState::AtRegister {
        return TransferResult::Blocked(BlockReason::NoCustomer);
    }
    let Some(&shelf_entity) = registry
        .shelves
        .iter()
        .find(|&&e| stations.get(e).map(|s| s.has_stock()).unwrap_or(false))
    else {
        return TransferResult::Blocked(BlockReason::Empty);
    };
    let Ok(mut shelf) = stations.get_mut(shelf_entity) else {
        return TransferResult::Blocked(BlockReason::Empty);
    };
    shelf.withdraw(1, StockActor::Player);
    let price = rng.range_u32(config.sale_price_min, config.sale_price_max) + progression.sale_value;
    queue.pop_front();
    customer.transition(CustomerState::Leaving);
    TransferResult::Sold { price }
}

/// Per-tick interaction dispatcher for the controlled entity.
pub fn auto_interact(
    mut players: Query<(&MapPosition, &mut Player, &mut Carry)>,
    mut stations: Query<&mut Station>,
    mut customers: Query<&mut Customer>,
    registry: Res<StationRegistry>,
    mut queue: ResMut<CheckoutQueue>,
    mut rng: ResMut<SimRng>,
    progression: Res<Progression>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
    mut pickup_writer: MessageWriter<PickupEvent>,
    mut stock_writer: MessageWriter<StockEvent>,
    mut sale_writer: MessageWriter<SaleEvent>,
) {
    let Ok((position, mut player, mut carry)) = players.single_mut() else {
        return;
    };
    // Cooldown decays every tick, whether or not anything is attempted.
    player.cooldown = (player.cooldown - time.delta).max(0.0);
    let pos = position.pos;

    // Crate pickup.
    if let Ok(mut station) = stations.get_mut(registry.crate_station) {
        if gate(player.cooldown, pos, &station.rect, &config).is_none() {
            if let TransferResult::PickedUp { amount } =
                try_pickup(&mut carry, &mut station, config.pickup_batch)
            {
                pickup_writer.write(PickupEvent { amount });
                player.cooldown = config.interact_cooldown;
                return;
            }
        }
    }

    // Shelf stocking, first nearby shelf in configured order wins.
    for &shelf_entity in &registry.shelves {
        let Ok(mut shelf) = stations.get_mut(shelf_entity) else {
            continue;
        };
        if gate(player.cooldown, pos, &shelf.rect, &config).is_some() {
            continue;
        }
        if let TransferResult::Stocked { amount } = try_stock(&mut carry, &mut shelf) {
            stock_writer.write(StockEvent {
                shelf: shelf.label.clone(),
                amount,
            });
            player.cooldown = config.interact_cooldown;
            return;
        }
    }

    // Register checkout.
    let register_rect = match stations.get(registry.register) {
        Ok(s) => s.rect,
        Err(_) => return,
    };
    if gate(player.cooldown, pos, &register_rect, &config).is_none() {
        if let TransferResult::Sold { price } = try_checkout(
            &mut stations,
            &mut customers,
            &registry,
            &mut queue,
            &mut rng,
            &progression,
            &config,
        ) {
            sale_writer.write(SaleEvent { price });
            player.cooldown = config.interact_cooldown;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::station::StationKind;

    fn crate_station() -> Station {
        Station::unlimited(
            StationKind::Crate,
            "Crate",
            Rect::new(40.0, 110.0, 46.0, 46.0),
        )
    }

    fn shelf(stock: u32) -> Station {
        Station::new(
            StationKind::Shelf,
            "Shelf A",
            Rect::new(120.0, 38.0, 70.0, 20.0),
            18,
        )
        .with_stock(stock)
    }

    #[test]
    fn pickup_moves_a_batch() {
        let mut carry = Carry::new(6);
        let mut station = crate_station();
        assert_eq!(
            try_pickup(&mut carry, &mut station, 2),
            TransferResult::PickedUp { amount: 2 }
        );
        assert_eq!(carry.count, 2);
    }

    #[test]
    fn pickup_respects_carry_room() {
        let mut carry = Carry::new(6);
        carry.count = 5;
        let mut station = crate_station();
        assert_eq!(
            try_pickup(&mut carry, &mut station, 2),
            TransferResult::PickedUp { amount: 1 }
        );
        assert_eq!(carry.count, 6);
    }

    #[test]
    fn pickup_blocked_when_full() {
        let mut carry = Carry::new(6);
        carry.count = 6;
        let mut station = crate_station();
        assert_eq!(
            try_pickup(&mut carry, &mut station, 2),
            TransferResult::Blocked(BlockReason::Full)
        );
        assert_eq!(carry.count, 6);
    }

    #[test]
    fn pickup_blocked_on_empty_finite_crate() {
        let mut carry = Carry::new(6);
        let mut station = Station::new(
            StationKind::Crate,
            "Crate",
            Rect::new(40.0, 110.0, 46.0, 46.0),
            30,
        );
        assert_eq!(
            try_pickup(&mut carry, &mut station, 2),
            TransferResult::Blocked(BlockReason::Empty)
        );
    }

    #[test]
    fn stocking_empties_the_carry_onto_the_shelf() {
        let mut carry = Carry::new(6);
        carry.count = 2;
        let mut s = shelf(0);
        assert_eq!(
            try_stock(&mut carry, &mut s),
            TransferResult::Stocked { amount: 2 }
        );
        assert_eq!(carry.count, 0);
        assert_eq!(s.stock, 2);
    }

    #[test]
    fn stocking_blocked_without_carry() {
        let mut carry = Carry::new(6);
        let mut s = shelf(0);
        assert_eq!(
            try_stock(&mut carry, &mut s),
            TransferResult::Blocked(BlockReason::Empty)
        );
        assert_eq!(s.stock, 0);
    }

    #[test]
    fn stocking_blocked_at_shelf_capacity() {
        let mut carry = Carry::new(6);
        carry.count = 3;
        let mut s = shelf(18);
        assert_eq!(
            try_stock(&mut carry, &mut s),
            TransferResult::Blocked(BlockReason::Full)
        );
        assert_eq!(carry.count, 3);
        assert_eq!(s.stock, 18);
    }

    #[test]
    fn pickup_then_stock_round_trips() {
        let mut carry = Carry::new(6);
        let mut supply = crate_station();
        let mut s = shelf(0);
        let before = carry.count;
        let TransferResult::PickedUp { amount } = try_pickup(&mut carry, &mut supply, 4) else {
            panic!("pickup failed");
        };
        let TransferResult::Stocked { amount: stocked } = try_stock(&mut carry, &mut s) else {
            panic!("stock failed");
        };
        assert_eq!(stocked, amount);
        assert_eq!(carry.count, before);
        assert_eq!(s.stock, amount);
    }

    #[test]
    fn gate_reports_cooldown_then_range() {
        let config = SimConfig::default();
        let rect = Rect::new(120.0, 38.0, 70.0, 20.0);
        let near = Vec2::new(155.0, 70.0);
        let far = Vec2::new(20.0, 170.0);
        assert_eq!(gate(0.1, near, &rect, &config), Some(BlockReason::Cooldown));
        assert_eq!(gate(0.0, far, &rect, &config), Some(BlockReason::OutOfRange));
        assert_eq!(gate(0.0, near, &rect, &config), None);
    }

    #[test]
    fn proximity_uses_pad_and_radius() {
        let config = SimConfig::default();
        let rect = Rect::new(120.0, 38.0, 70.0, 20.0);
        // 18 units off the bottom edge: within pad (2) + radius (16)
        assert!(near_station(Vec2::new(155.0, 76.0), &rect, &config));
        // 19 units off: outside
        assert!(!near_station(Vec2::new(155.0, 77.0), &rect, &config));
    }
}
