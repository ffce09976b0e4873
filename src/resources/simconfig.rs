//! Simulation tuning configuration.
//!
//! Provides safe defaults, optional loading from an INI file, and fail-fast
//! validation. Invalid values are programming/configuration errors and abort
//! session construction before the first tick; they are never runtime
//! conditions.
//!
//! # Configuration File Format
//!
//! ```ini
//! [player]
//! speed = 90.0
//! radius = 6.0
//! carry_max = 6
//!
//! [input]
//! pointer_radius = 120.0
//! pointer_deadzone = 0.15
//! gamepad_deadzone = 0.25
//! response = 16.0
//! friction = 10.0
//!
//! [interaction]
//! radius = 16.0
//! pad = 2.0
//! cooldown = 0.3
//! pickup_batch = 2
//!
//! [customers]
//! speed_min = 38.0
//! speed_max = 52.0
//! spawn_interval = 2.5
//! spawn_jitter = 1.0
//! queue_capacity = 4
//!
//! [economy]
//! sale_price_min = 8
//! sale_price_max = 15
//! sale_xp = 4
//! stock_xp = 1
//! xp_threshold = 10
//! xp_growth = 1.4
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::Path;
use thiserror::Error;

use crate::resources::queue::MAX_QUEUE_SLOTS;

/// Errors detected while validating configuration or layout at setup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be in [0, 1) (got {value})")]
    BadDeadzone { name: &'static str, value: f32 },
    #[error("queue capacity must be in 1..={max} (got {got})")]
    BadQueueCapacity { got: usize, max: usize },
    #[error("sale price range is inverted ({min} > {max})")]
    BadPriceRange { min: u32, max: u32 },
    #[error("xp growth factor must be >= 1.0 (got {0})")]
    BadXpGrowth(f32),
    #[error("station '{0}' has zero capacity")]
    ZeroCapacityStation(String),
    #[error("layout has no shelves")]
    NoShelves,
    #[error("{name} rectangle is degenerate")]
    DegenerateRect { name: String },
    #[error("failed to read config file: {0}")]
    ConfigFile(String),
}

/// Tuning values for the simulation core.
///
/// Every stochastic or formula-driven behavior reads its constants from
/// here so tests can pin them and the demo can override them from disk.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    // Player
    pub player_speed: f32,
    pub player_radius: f32,
    pub carry_max: u32,
    pub carry_max_cap: u32,

    // Input normalization
    pub pointer_radius: f32,
    pub pointer_deadzone: f32,
    pub gamepad_deadzone: f32,
    pub input_response: f32,
    pub input_friction: f32,

    // Interaction
    pub interact_radius: f32,
    pub station_pad: f32,
    pub interact_cooldown: f32,
    pub pickup_batch: u32,

    // Customers
    pub customer_speed_min: f32,
    pub customer_speed_max: f32,
    pub customer_radius: f32,
    pub spawn_interval: f32,
    pub spawn_jitter: f32,
    pub spawn_interval_floor: f32,
    pub spawn_interval_decrement: f32,
    pub queue_capacity: usize,
    pub arrive_eps: f32,

    // Economy / progression
    pub sale_price_min: u32,
    pub sale_price_max: u32,
    pub sale_xp: u32,
    pub stock_xp: u32,
    pub xp_threshold: u32,
    pub xp_growth: f32,
    pub xp_flat: u32,
    pub carry_bonus_chance: f32,

    // Stepping
    pub max_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_speed: 90.0,
            player_radius: 6.0,
            carry_max: 6,
            carry_max_cap: 12,

            pointer_radius: 120.0,
            pointer_deadzone: 0.15,
            gamepad_deadzone: 0.25,
            input_response: 16.0,
            input_friction: 10.0,

            interact_radius: 16.0,
            station_pad: 2.0,
            interact_cooldown: 0.3,
            pickup_batch: 2,

            customer_speed_min: 38.0,
            customer_speed_max: 52.0,
            customer_radius: 6.0,
            spawn_interval: 2.5,
            spawn_jitter: 1.0,
            spawn_interval_floor: 0.8,
            spawn_interval_decrement: 0.15,
            queue_capacity: 4,
            arrive_eps: 1.0,

            sale_price_min: 8,
            sale_price_max: 15,
            sale_xp: 4,
            stock_xp: 1,
            xp_threshold: 10,
            xp_growth: 1.4,
            xp_flat: 2,
            carry_bonus_chance: 0.5,

            max_dt: 0.033,
        }
    }
}

impl SimConfig {
    /// Load overrides from an INI file. Missing keys keep their current
    /// values; an unreadable file is an error.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SetupError> {
        let mut ini = Ini::new();
        ini.load(path.as_ref())
            .map_err(|e| SetupError::ConfigFile(e.to_string()))?;
        self.apply_ini(&ini);
        info!("Loaded config overrides from {}", path.as_ref().display());
        Ok(())
    }

    /// Load overrides from INI text. Used by tests and embedded presets.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), SetupError> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(SetupError::ConfigFile)?;
        self.apply_ini(&ini);
        Ok(())
    }

    fn apply_ini(&mut self, ini: &Ini) {
        let float = |section: &str, key: &str, slot: &mut f32| {
            if let Some(v) = ini.getfloat(section, key).ok().flatten() {
                *slot = v as f32;
            }
        };
        float("player", "speed", &mut self.player_speed);
        float("player", "radius", &mut self.player_radius);
        float("input", "pointer_radius", &mut self.pointer_radius);
        float("input", "pointer_deadzone", &mut self.pointer_deadzone);
        float("input", "gamepad_deadzone", &mut self.gamepad_deadzone);
        float("input", "response", &mut self.input_response);
        float("input", "friction", &mut self.input_friction);
        float("interaction", "radius", &mut self.interact_radius);
        float("interaction", "pad", &mut self.station_pad);
        float("interaction", "cooldown", &mut self.interact_cooldown);
        float("customers", "speed_min", &mut self.customer_speed_min);
        float("customers", "speed_max", &mut self.customer_speed_max);
        float("customers", "spawn_interval", &mut self.spawn_interval);
        float("customers", "spawn_jitter", &mut self.spawn_jitter);
        float("economy", "xp_growth", &mut self.xp_growth);

        let uint = |section: &str, key: &str, slot: &mut u32| {
            if let Some(v) = ini.getuint(section, key).ok().flatten() {
                *slot = v as u32;
            }
        };
        uint("player", "carry_max", &mut self.carry_max);
        uint("player", "carry_max_cap", &mut self.carry_max_cap);
        uint("interaction", "pickup_batch", &mut self.pickup_batch);
        uint("economy", "sale_price_min", &mut self.sale_price_min);
        uint("economy", "sale_price_max", &mut self.sale_price_max);
        uint("economy", "sale_xp", &mut self.sale_xp);
        uint("economy", "stock_xp", &mut self.stock_xp);
        uint("economy", "xp_threshold", &mut self.xp_threshold);

        if let Some(v) = ini.getuint("customers", "queue_capacity").ok().flatten() {
            self.queue_capacity = v as usize;
        }
    }

    /// Fail-fast validation, run once at session construction.
    pub fn validate(&self) -> Result<(), SetupError> {
        let positives: [(&'static str, f32); 10] = [
            ("player.speed", self.player_speed),
            ("player.radius", self.player_radius),
            ("input.pointer_radius", self.pointer_radius),
            ("input.response", self.input_response),
            ("input.friction", self.input_friction),
            ("interaction.radius", self.interact_radius),
            ("interaction.cooldown", self.interact_cooldown),
            ("customers.speed_min", self.customer_speed_min),
            ("customers.speed_max", self.customer_speed_max),
            ("max_dt", self.max_dt),
        ];
        for (name, value) in positives {
            if value <= 0.0 {
                return Err(SetupError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("input.pointer_deadzone", self.pointer_deadzone),
            ("input.gamepad_deadzone", self.gamepad_deadzone),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(SetupError::BadDeadzone { name, value });
            }
        }
        if self.queue_capacity == 0 || self.queue_capacity > MAX_QUEUE_SLOTS {
            return Err(SetupError::BadQueueCapacity {
                got: self.queue_capacity,
                max: MAX_QUEUE_SLOTS,
            });
        }
        if self.sale_price_min > self.sale_price_max {
            return Err(SetupError::BadPriceRange {
                min: self.sale_price_min,
                max: self.sale_price_max,
            });
        }
        if self.xp_growth < 1.0 {
            return Err(SetupError::BadXpGrowth(self.xp_growth));
        }
        if self.carry_max == 0 {
            return Err(SetupError::NonPositive {
                name: "player.carry_max",
                value: 0.0,
            });
        }
        if self.xp_threshold == 0 {
            return Err(SetupError::NonPositive {
                name: "economy.xp_threshold",
                value: 0.0,
            });
        }
        Ok(())
    }
}
