//! Discrete notifications exposed to host collaborators.
//!
//! Each simulation step buffers its notifications as `bevy_ecs` messages;
//! [`crate::game::ShopSim::drain_events`] collects them into [`SimEvent`]
//! values carrying the minimal payload needed to drive a sound effect or a
//! toast message. Unread messages are dropped; a missing HUD or audio
//! consumer is harmless.
//!
//! Submodules:
//! - [`customer`] – spawn and departure notifications
//! - [`progression`] – level-up notifications
//! - [`transfer`] – pickup, stocking, and sale notifications

pub mod customer;
pub mod progression;
pub mod transfer;

use crate::events::customer::{CustomerDepartedEvent, CustomerSpawnedEvent};
use crate::events::progression::LevelUpEvent;
use crate::events::transfer::{PickupEvent, SaleEvent, StockEvent};

/// Unified notification stream handed to the host once per tick.
#[derive(Debug, Clone)]
pub enum SimEvent {
    Pickup(PickupEvent),
    Stock(StockEvent),
    Sale(SaleEvent),
    LevelUp(LevelUpEvent),
    CustomerSpawned(CustomerSpawnedEvent),
    CustomerDeparted(CustomerDepartedEvent),
}

impl SimEvent {
    /// Short stable name, handy for tallies and log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::Pickup(_) => "pickup",
            SimEvent::Stock(_) => "stock",
            SimEvent::Sale(_) => "sale",
            SimEvent::LevelUp(_) => "level_up",
            SimEvent::CustomerSpawned(_) => "customer_spawned",
            SimEvent::CustomerDeparted(_) => "customer_departed",
        }
    }
}
