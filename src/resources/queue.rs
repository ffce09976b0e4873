//! The checkout queue in front of the register.
//!
//! A fixed-capacity, ordered list of customer entities. Slot index 0 is the
//! front; each customer derives its waiting position from its current index,
//! so the line compacts automatically when the front leaves.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::{Entity, Resource};
use glam::Vec2;

/// Hard upper bound on queue slots; the configured capacity may be lower.
pub const MAX_QUEUE_SLOTS: usize = 4;

#[derive(Resource, Debug, Clone)]
pub struct CheckoutQueue {
    slots: ArrayVec<Entity, MAX_QUEUE_SLOTS>,
    /// Configured capacity, `1..=MAX_QUEUE_SLOTS`.
    pub capacity: usize,
    /// World position of slot 0.
    pub base: Vec2,
    /// Spacing between consecutive slots.
    pub gap: f32,
}

impl CheckoutQueue {
    pub fn new(capacity: usize, base: Vec2, gap: f32) -> Self {
        Self {
            slots: ArrayVec::new(),
            capacity: capacity.min(MAX_QUEUE_SLOTS),
            base,
            gap,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn front(&self) -> Option<Entity> {
        self.slots.first().copied()
    }

    /// Index of `entity` in the line, if queued.
    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.slots.iter().position(|&e| e == entity)
    }

    /// Join the back of the line. Returns false when the queue is full.
    pub fn push_back(&mut self, entity: Entity) -> bool {
        if self.is_full() || self.index_of(entity).is_some() {
            return false;
        }
        self.slots.push(entity);
        true
    }

    /// Remove and return the front customer.
    pub fn pop_front(&mut self) -> Option<Entity> {
        if self.slots.is_empty() {
            None
        } else {
            Some(self.slots.remove(0))
        }
    }

    /// Remove `entity` wherever it stands, if present.
    pub fn remove(&mut self, entity: Entity) {
        if let Some(i) = self.index_of(entity) {
            self.slots.remove(i);
        }
    }

    /// World position of the given slot index.
    pub fn slot_position(&self, index: usize) -> Vec2 {
        Vec2::new(self.base.x, self.base.y + index as f32 * self.gap)
    }
}
