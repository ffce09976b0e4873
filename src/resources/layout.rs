//! Static shop floor layout.
//!
//! Positions and capacities of the stations, the collision solids, and the
//! fixed walk targets are configuration data supplied at initialization,
//! deserializable from JSON. The built-in default mirrors the classic
//! 360×200 floor: supply crate on the left, three shelves along the top,
//! register on the right, counter block in the middle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rect::Rect;
use crate::resources::simconfig::SetupError;

/// A shelf definition: label, solid-free zone rectangle, and capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelfZone {
    pub label: String,
    pub rect: Rect,
    pub capacity: u32,
}

/// The supply crate. `stock = None` means effectively unlimited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrateZone {
    pub rect: Rect,
    pub stock: Option<u32>,
}

/// Full static description of the shop floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopLayout {
    pub bounds: Rect,
    pub solids: Vec<Rect>,
    pub player_start: Vec2,
    pub crate_zone: CrateZone,
    pub shelves: Vec<ShelfZone>,
    pub register: Rect,
    pub entrance: Vec2,
    pub exit: Vec2,
    pub queue_base: Vec2,
    pub queue_gap: f32,
}

impl Default for ShopLayout {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 360.0, 200.0),
            solids: vec![
                // Outer walls
                Rect::new(10.0, 10.0, 340.0, 10.0),
                Rect::new(10.0, 180.0, 340.0, 10.0),
                Rect::new(10.0, 10.0, 10.0, 180.0),
                Rect::new(340.0, 10.0, 10.0, 180.0),
                // Counter block; ends well short of the register block so
                // walkers can round either side of it
                Rect::new(110.0, 100.0, 150.0, 45.0),
                // Shelf strip
                Rect::new(110.0, 32.0, 260.0, 30.0),
                // Register block
                Rect::new(295.0, 90.0, 55.0, 40.0),
            ],
            player_start: Vec2::new(45.0, 80.0),
            crate_zone: CrateZone {
                rect: Rect::new(40.0, 110.0, 46.0, 46.0),
                stock: None,
            },
            shelves: vec![
                ShelfZone {
                    label: "Shelf A".into(),
                    rect: Rect::new(120.0, 38.0, 70.0, 20.0),
                    capacity: 30,
                },
                ShelfZone {
                    label: "Shelf B".into(),
                    rect: Rect::new(205.0, 38.0, 70.0, 20.0),
                    capacity: 30,
                },
                ShelfZone {
                    label: "Shelf C".into(),
                    rect: Rect::new(290.0, 38.0, 70.0, 20.0),
                    capacity: 30,
                },
            ],
            register: Rect::new(300.0, 98.0, 44.0, 28.0),
            entrance: Vec2::new(30.0, 60.0),
            exit: Vec2::new(20.0, 20.0),
            queue_base: Vec2::new(305.0, 140.0),
            queue_gap: 14.0,
        }
    }
}

impl ShopLayout {
    /// Fail-fast validation, run once at session construction.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.shelves.is_empty() {
            return Err(SetupError::NoShelves);
        }
        for shelf in &self.shelves {
            if shelf.capacity == 0 {
                return Err(SetupError::ZeroCapacityStation(shelf.label.clone()));
            }
            if shelf.rect.is_degenerate() {
                return Err(SetupError::DegenerateRect {
                    name: shelf.label.clone(),
                });
            }
        }
        for (name, rect) in [
            ("bounds", &self.bounds),
            ("crate", &self.crate_zone.rect),
            ("register", &self.register),
        ] {
            if rect.is_degenerate() {
                return Err(SetupError::DegenerateRect { name: name.into() });
            }
        }
        for (i, solid) in self.solids.iter().enumerate() {
            if solid.is_degenerate() {
                return Err(SetupError::DegenerateRect {
                    name: format!("solid #{i}"),
                });
            }
        }
        if self.queue_gap <= 0.0 {
            return Err(SetupError::NonPositive {
                name: "layout.queue_gap",
                value: self.queue_gap,
            });
        }
        Ok(())
    }
}
