//! ECS components for entities.
//!
//! Submodules overview:
//! - [`circlecollider`] – circular collision shape for moving entities
//! - [`customer`] – autonomous shopper agent and its closed state machine
//! - [`mapposition`] – world-space position for an entity
//! - [`player`] – controlled entity marker, carry load, interaction cooldown
//! - [`station`] – fixed interactive zone (crate, shelf, register) with stock

pub mod circlecollider;
pub mod customer;
pub mod mapposition;
pub mod player;
pub mod station;
