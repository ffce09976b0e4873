//! Customer agent component and its state machine.
//!
//! Customers walk a fixed loop: enter, pick an item from a shelf, queue at
//! the register, get checked out (by the interaction dispatcher, never by
//! themselves), and leave. The state set is a closed enumeration with an
//! explicit transition table; anything outside the table is rejected and
//! logged rather than applied.

use bevy_ecs::prelude::{Component, Entity};
use serde::Serialize;

/// Behavioral state of a customer agent.
///
/// Allowed transitions:
///
/// ```text
/// Spawning -> ToShelf
/// ToShelf -> AcquireItem
/// AcquireItem -> ToQueue | ToShelf (reassigned) | Leaving (gave up)
/// ToQueue -> Waiting | Leaving (lost queue slot)
/// Waiting -> AtRegister | Leaving (lost queue slot)
/// AtRegister -> Leaving
/// Leaving -> Removed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerState {
    Spawning,
    ToShelf,
    AcquireItem,
    ToQueue,
    Waiting,
    AtRegister,
    Leaving,
    Removed,
}

impl CustomerState {
    /// The closed transition table.
    pub fn can_transition(self, next: CustomerState) -> bool {
        use CustomerState::*;
        matches!(
            (self, next),
            (Spawning, ToShelf)
                | (ToShelf, AcquireItem)
                | (AcquireItem, ToQueue)
                | (AcquireItem, ToShelf)
                | (AcquireItem, Leaving)
                | (ToQueue, Waiting)
                | (ToQueue, Leaving)
                | (Waiting, AtRegister)
                | (Waiting, Leaving)
                | (AtRegister, Leaving)
                | (Leaving, Removed)
        )
    }
}

/// An autonomous shopper.
///
/// `target_shelf` is reassignable while the customer hunts for stock. The
/// queue slot index is not stored here; it is derived from the entity's
/// position in the [`CheckoutQueue`](crate::resources::queue::CheckoutQueue).
#[derive(Component, Debug, Clone)]
pub struct Customer {
    pub state: CustomerState,
    pub target_shelf: Entity,
    pub has_item: bool,
    pub speed: f32,
}

impl Customer {
    pub fn new(target_shelf: Entity, speed: f32) -> Self {
        Self {
            state: CustomerState::Spawning,
            target_shelf,
            has_item: false,
            speed,
        }
    }

    /// Apply a transition if the table allows it. Returns whether the state
    /// changed; rejected transitions keep the current state and log a warning.
    pub fn transition(&mut self, next: CustomerState) -> bool {
        if self.state.can_transition(next) {
            log::debug!("customer {:?} -> {:?}", self.state, next);
            self.state = next;
            true
        } else {
            log::warn!("rejected customer transition {:?} -> {:?}", self.state, next);
            false
        }
    }
}
