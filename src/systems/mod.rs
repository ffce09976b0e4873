//! Simulation systems.
//!
//! One tick runs these in fixed order (see [`crate::game`]):
//! input normalization, player movement/collision, player interactions,
//! customer spawn + AI, progression. The order is part of the contract:
//! player interactions and customer AI both mutate shelf stock, and the
//! player pass resolves first so a recorded input sequence replays exactly.
//!
//! Submodules overview
//! - [`customer`] – spawn gating and the customer state machine
//! - [`input`] – normalize pointer/keyboard/gamepad into one smoothed vector
//! - [`interaction`] – proximity + cooldown gated resource transfers
//! - [`movement`] – position integration and solid-rectangle resolution
//! - [`progression`] – xp/cash accumulation and level-up side effects
//! - [`time`] – capped delta update of [`crate::resources::worldtime::WorldTime`]

pub mod customer;
pub mod input;
pub mod interaction;
pub mod movement;
pub mod progression;
pub mod time;
