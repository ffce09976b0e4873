//! Customer lifecycle notifications.

use bevy_ecs::message::Message;

/// A new customer entered the shop.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CustomerSpawnedEvent {
    /// Label of the shelf the customer is heading for.
    pub target_shelf: String,
}

/// A customer reached the exit and was removed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerDepartedEvent {
    /// Whether the customer was checked out (false: gave up empty-handed).
    pub served: bool,
}
