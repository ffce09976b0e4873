//! Input normalization.
//!
//! Collapses the raw pointer-drag, keyboard, and gamepad signals in
//! [`RawInput`] into one smoothed vector in [-1,1]². Exactly one source
//! drives a tick: an active pointer drag wins over the gamepad, which wins
//! over the keyboard; sources are never blended. The output approaches the
//! selected target exponentially, which gives the acceleration/deceleration
//! feel while staying deterministic for a given `dt` sequence.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::resources::input::{MoveVector, RawInput};
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;

/// Drags shorter than this many world units read as no input at all.
const MIN_DRAG_DISTANCE: f32 = 1.0;

/// 1/sqrt(2), for diagonal key presses.
const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Pointer drag vector: capped at `pointer_radius`, deadzone rescaled,
/// direction preserved.
fn pointer_vector(anchor: Vec2, current: Vec2, config: &SimConfig) -> Vec2 {
    let delta = current - anchor;
    let len = delta.length();
    if len < MIN_DRAG_DISTANCE {
        return Vec2::ZERO;
    }
    let magnitude = (len / config.pointer_radius).min(1.0);
    let dz = config.pointer_deadzone;
    if magnitude < dz {
        return Vec2::ZERO;
    }
    let rescaled = (magnitude - dz) / (1.0 - dz);
    delta / len * rescaled
}

/// Gamepad stick vector with its own deadzone rescale, clamped to unit
/// length.
fn gamepad_vector(axes: Vec2, config: &SimConfig) -> Vec2 {
    let len = axes.length();
    let dz = config.gamepad_deadzone;
    if len <= dz {
        return Vec2::ZERO;
    }
    let rescaled = ((len - dz) / (1.0 - dz)).min(1.0);
    axes / len * rescaled
}

/// Unit vector from the four directional keys; diagonals normalized.
fn keyboard_vector(raw: &RawInput) -> Vec2 {
    let mut v = Vec2::ZERO;
    if raw.keys.left {
        v.x -= 1.0;
    }
    if raw.keys.right {
        v.x += 1.0;
    }
    if raw.keys.up {
        v.y -= 1.0;
    }
    if raw.keys.down {
        v.y += 1.0;
    }
    if v.x != 0.0 && v.y != 0.0 {
        v *= DIAGONAL;
    }
    v
}

/// Produce the tick's smoothed movement vector from the raw signals.
pub fn normalize_input(
    raw: Res<RawInput>,
    mut move_vector: ResMut<MoveVector>,
    config: Res<SimConfig>,
    time: Res<WorldTime>,
) {
    let target = if raw.pointer.active {
        pointer_vector(raw.pointer.anchor, raw.pointer.current, &config)
    } else {
        let pad = gamepad_vector(raw.gamepad, &config);
        if pad != Vec2::ZERO {
            pad
        } else {
            keyboard_vector(&raw)
        }
    };
    move_vector.target = target;

    // Approach the target while input is present, decay to zero otherwise.
    let k = if target != Vec2::ZERO {
        config.input_response
    } else {
        config.input_friction
    };
    let blend = 1.0 - (-k * time.delta).exp();
    let current = move_vector.value;
    move_vector.value = current + (target - current) * blend;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::input::PointerDrag;

    const EPSILON: f32 = 1e-5;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(SimConfig::default());
        world.insert_resource(RawInput::default());
        world.insert_resource(MoveVector::default());
        world.insert_resource(WorldTime {
            delta: 1.0 / 60.0,
            ..WorldTime::default()
        });
        world
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(normalize_input);
        schedule.run(world);
    }

    fn ticks(world: &mut World, n: usize) {
        for _ in 0..n {
            tick(world);
        }
    }

    #[test]
    fn smoothing_takes_one_exponential_step_toward_the_target() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.keys.right = true;
        }
        tick(&mut w);
        let response = w.resource::<SimConfig>().input_response;
        let expected = 1.0 - (-response / 60.0).exp();
        let mv = w.resource::<MoveVector>();
        assert!((mv.value.x - expected).abs() < EPSILON);
        assert_eq!(mv.value.y, 0.0);
    }

    #[test]
    fn keyboard_diagonal_is_unit_length() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.keys.right = true;
            raw.keys.down = true;
        }
        ticks(&mut w, 120);
        let mv = w.resource::<MoveVector>();
        assert!((mv.target.length() - 1.0).abs() < EPSILON);
        assert!((mv.value.length() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn short_drag_is_zero() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.pointer = PointerDrag {
                active: true,
                anchor: Vec2::new(100.0, 100.0),
                current: Vec2::new(100.5, 100.0),
            };
        }
        tick(&mut w);
        assert_eq!(w.resource::<MoveVector>().target, Vec2::ZERO);
    }

    #[test]
    fn drag_below_deadzone_is_zero() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            // 12 units of a 120-unit radius: magnitude 0.1 < deadzone 0.15
            raw.pointer = PointerDrag {
                active: true,
                anchor: Vec2::new(100.0, 100.0),
                current: Vec2::new(112.0, 100.0),
            };
        }
        tick(&mut w);
        assert_eq!(w.resource::<MoveVector>().target, Vec2::ZERO);
    }

    #[test]
    fn full_drag_saturates_at_one() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.pointer = PointerDrag {
                active: true,
                anchor: Vec2::new(100.0, 100.0),
                current: Vec2::new(400.0, 100.0),
            };
        }
        tick(&mut w);
        let target = w.resource::<MoveVector>().target;
        assert!((target - Vec2::X).length() < EPSILON);
    }

    #[test]
    fn active_pointer_wins_over_keys_and_pad() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.keys.left = true;
            raw.gamepad = Vec2::new(0.0, 1.0);
            raw.pointer = PointerDrag {
                active: true,
                anchor: Vec2::ZERO,
                current: Vec2::new(120.0, 0.0),
            };
        }
        tick(&mut w);
        let target = w.resource::<MoveVector>().target;
        assert!(target.x > 0.0 && target.y == 0.0);
    }

    #[test]
    fn gamepad_wins_over_keys() {
        let mut w = world();
        {
            let mut raw = w.resource_mut::<RawInput>();
            raw.keys.left = true;
            raw.gamepad = Vec2::new(1.0, 0.0);
        }
        tick(&mut w);
        assert!(w.resource::<MoveVector>().target.x > 0.0);
    }

    #[test]
    fn gamepad_deadzone_rescales() {
        let config = SimConfig::default();
        assert_eq!(gamepad_vector(Vec2::new(0.2, 0.0), &config), Vec2::ZERO);
        let v = gamepad_vector(Vec2::new(0.625, 0.0), &config);
        assert!((v.x - 0.5).abs() < EPSILON);
        let full = gamepad_vector(Vec2::new(1.0, 0.0), &config);
        assert!((full.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn release_decays_toward_zero() {
        let mut w = world();
        w.resource_mut::<RawInput>().keys.right = true;
        ticks(&mut w, 60);
        assert!(w.resource::<MoveVector>().value.x > 0.9);

        w.resource_mut::<RawInput>().keys.right = false;
        tick(&mut w);
        let after_one = w.resource::<MoveVector>().value.x;
        assert!(after_one < 0.9 && after_one > 0.0);
        ticks(&mut w, 120);
        assert!(w.resource::<MoveVector>().value.length() < 1e-3);
    }

    #[test]
    fn smoothing_is_deterministic() {
        let run = || {
            let mut w = world();
            w.resource_mut::<RawInput>().keys.down = true;
            ticks(&mut w, 17);
            w.resource::<MoveVector>().value
        };
        assert_eq!(run(), run());
    }
}
