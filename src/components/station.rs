//! Fixed interactive zones: the supply crate, the shelves, and the register.
//!
//! All stock mutation funnels through [`Station::withdraw`] and
//! [`Station::deposit`], tagged with the [`StockActor`] performing the
//! transfer, so player-triggered and customer-triggered mutation share one
//! audited path and the `0 <= stock <= capacity` invariant holds everywhere.

use bevy_ecs::prelude::Component;
use serde::Serialize;

use crate::rect::Rect;

/// The three kinds of interactive zone on the shop floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StationKind {
    Crate,
    Shelf,
    Register,
}

/// Who is performing a stock transfer. Used for log attribution only;
/// the transfer rules are identical for both actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockActor {
    Player,
    Customer,
}

/// A fixed interactive zone with a bounding rectangle and bounded stock.
///
/// The crate may be unlimited, in which case `stock`/`capacity` are ignored
/// by [`Station::withdraw`] and it never runs dry.
#[derive(Component, Debug, Clone)]
pub struct Station {
    pub kind: StationKind,
    pub label: String,
    pub rect: Rect,
    pub stock: u32,
    pub capacity: u32,
    pub unlimited: bool,
}

impl Station {
    pub fn new(kind: StationKind, label: impl Into<String>, rect: Rect, capacity: u32) -> Self {
        Self {
            kind,
            label: label.into(),
            rect,
            stock: 0,
            capacity,
            unlimited: false,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock.min(self.capacity);
        self
    }

    /// An unlimited supply station. `withdraw` always succeeds in full.
    pub fn unlimited(kind: StationKind, label: impl Into<String>, rect: Rect) -> Self {
        Self {
            kind,
            label: label.into(),
            rect,
            stock: u32::MAX,
            capacity: u32::MAX,
            unlimited: true,
        }
    }

    pub fn has_stock(&self) -> bool {
        self.unlimited || self.stock > 0
    }

    /// Remaining capacity for deposits. Unlimited stations report zero room;
    /// nothing is ever stocked back into the crate.
    pub fn room(&self) -> u32 {
        if self.unlimited {
            0
        } else {
            self.capacity.saturating_sub(self.stock)
        }
    }

    /// Take up to `amount` units out of the station. Returns the number of
    /// units actually moved (possibly zero); stock never goes below zero.
    pub fn withdraw(&mut self, amount: u32, actor: StockActor) -> u32 {
        let moved = if self.unlimited {
            amount
        } else {
            let moved = amount.min(self.stock);
            self.stock -= moved;
            moved
        };
        if moved > 0 {
            log::trace!(
                "{:?} withdrew {} from {} (stock now {})",
                actor,
                moved,
                self.label,
                if self.unlimited { u32::MAX } else { self.stock }
            );
        }
        moved
    }

    /// Put up to `amount` units into the station. Returns the number of
    /// units actually moved; stock never exceeds capacity.
    pub fn deposit(&mut self, amount: u32, actor: StockActor) -> u32 {
        let moved = amount.min(self.room());
        self.stock += moved;
        if moved > 0 {
            log::trace!(
                "{:?} deposited {} into {} (stock now {}/{})",
                actor,
                moved,
                self.label,
                self.stock,
                self.capacity
            );
        }
        moved
    }
}
