use bevy_ecs::prelude::Component;

/// Marker for the single controlled entity, plus its interaction cooldown.
///
/// The cooldown is simulation time in seconds; while it is above zero the
/// interaction dispatcher refuses auto-triggers. It decays every tick
/// regardless of whether an interaction was attempted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player {
    pub cooldown: f32,
}

/// Units currently carried by the player, bounded by `max`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Carry {
    pub count: u32,
    pub max: u32,
}

impl Carry {
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    /// Remaining capacity.
    pub fn room(&self) -> u32 {
        self.max.saturating_sub(self.count)
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.max
    }
}
