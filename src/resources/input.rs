//! Raw input pushed by the host and the normalized movement vector.
//!
//! The core never reads platform input APIs. The host forwards pointer
//! drag positions (local coordinates), held directional keys, and raw
//! gamepad stick axes into [`RawInput`];
//! [`normalize_input`](crate::systems::input::normalize_input) turns them
//! into the smoothed [`MoveVector`] each tick.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

/// State of a drag-to-walk pointer gesture.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerDrag {
    /// Whether a drag is in progress.
    pub active: bool,
    /// Where the drag started.
    pub anchor: Vec2,
    /// Current pointer position.
    pub current: Vec2,
}

/// Currently-held directional keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Raw input signals for the current tick, pushed by the host.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RawInput {
    pub pointer: PointerDrag,
    pub keys: HeldKeys,
    /// Raw gamepad stick axes in [-1,1]²; deadzone is applied downstream.
    pub gamepad: Vec2,
}

/// The smoothed movement vector in [-1,1]², output of input normalization.
///
/// `target` is the selected source's vector for the tick; `value` approaches
/// it exponentially and is what movement integrates.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MoveVector {
    pub target: Vec2,
    pub value: Vec2,
}
