//! Level-up notifications.

use bevy_ecs::message::Message;

/// One xp threshold was crossed. Crossing several thresholds in one tick
/// emits one message per crossing.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpEvent {
    /// Level reached.
    pub level: u32,
    /// The next threshold after recomputation.
    pub xp_threshold: u32,
    /// Whether this crossing granted an extra carry slot.
    pub carry_bonus: bool,
}
