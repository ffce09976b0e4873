//! Resource transfer notifications emitted by the interaction dispatcher.

use bevy_ecs::message::Message;

/// The player took stock from the supply crate.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupEvent {
    /// Units moved into the carry.
    pub amount: u32,
}

/// The player stocked a shelf.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct StockEvent {
    /// Label of the shelf that was stocked.
    pub shelf: String,
    /// Units moved out of the carry.
    pub amount: u32,
}

/// A customer was checked out at the register.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaleEvent {
    /// Price paid, including the progression sale bonus.
    pub price: u32,
}
