//! ECS resources made available to systems.
//!
//! Overview
//! - `input` – raw input pushed by the host and the smoothed movement vector
//! - `layout` – static shop floor geometry supplied at initialization
//! - `progression` – xp, cash, level, and level-scaled tuning values
//! - `queue` – the fixed-capacity checkout queue in front of the register
//! - `registry` – configured ordering of the station entities
//! - `rng` – seeded pseudo-random source for all stochastic decisions
//! - `simconfig` – tuning values with INI loading and fail-fast validation
//! - `spawner` – customer spawn countdown
//! - `worldmap` – bounds and solid rectangles used for collision
//! - `worldtime` – simulation time and capped delta

pub mod input;
pub mod layout;
pub mod progression;
pub mod queue;
pub mod registry;
pub mod rng;
pub mod simconfig;
pub mod spawner;
pub mod worldmap;
pub mod worldtime;
