//! Vinyl Shop simulation core.
//!
//! This module exposes the simulation's ECS components, resources, systems,
//! and events for use by host applications and integration tests. The
//! rendering/HUD/audio side of the game is a consumer of [`game::ShopSim`];
//! nothing in this crate touches a drawing surface or a speaker.

pub mod components;
pub mod events;
pub mod game;
pub mod rect;
pub mod resources;
pub mod snapshot;
pub mod systems;
