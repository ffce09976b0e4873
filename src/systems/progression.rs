//! End-of-tick progression pass: cash, xp, and level rollover.
//!
//! Stock and sale messages are folded into the [`Progression`] resource
//! here, after the interaction and customer passes, so a tick's earnings
//! are visible in the same tick's snapshot.

use bevy_ecs::prelude::*;

use crate::components::player::Carry;
use crate::events::progression::LevelUpEvent;
use crate::events::transfer::{SaleEvent, StockEvent};
use crate::resources::progression::Progression;
use crate::resources::rng::SimRng;
use crate::resources::simconfig::SimConfig;

/// Roll the xp threshold forward one level.
///
/// The remainder carries over, so a large award can cross several
/// thresholds at once; callers loop until xp drops below the threshold.
pub fn next_threshold(threshold: u32, growth: f32, flat: u32) -> u32 {
    (threshold as f32 * growth).floor() as u32 + flat
}

pub fn apply_progression(
    mut progression: ResMut<Progression>,
    mut carries: Query<&mut Carry>,
    mut rng: ResMut<SimRng>,
    config: Res<SimConfig>,
    mut stock_events: MessageReader<StockEvent>,
    mut sale_events: MessageReader<SaleEvent>,
    mut level_writer: MessageWriter<LevelUpEvent>,
) {
    for stocked in stock_events.read() {
        progression.xp += stocked.amount * config.stock_xp;
    }
    for sale in sale_events.read() {
        progression.cash += sale.price;
        progression.xp += config.sale_xp;
    }

    while progression.xp >= progression.xp_threshold {
        progression.xp -= progression.xp_threshold;
        progression.xp_threshold =
            next_threshold(progression.xp_threshold, config.xp_growth, config.xp_flat);
        progression.level += 1;
        progression.sale_value += 1;
        progression.spawn_interval = (progression.spawn_interval
            - config.spawn_interval_decrement)
            .max(config.spawn_interval_floor);

        // Each crossing independently rolls for extra carry room, up to
        // the hard cap.
        let mut carry_bonus = false;
        if let Ok(mut carry) = carries.single_mut() {
            if carry.max < config.carry_max_cap && rng.chance(config.carry_bonus_chance) {
                carry.max += 1;
                carry_bonus = true;
            }
        }
        log::info!(
            "level up: level={} next_threshold={} carry_bonus={}",
            progression.level,
            progression.xp_threshold,
            carry_bonus
        );
        level_writer.write(LevelUpEvent {
            level: progression.level,
            xp_threshold: progression.xp_threshold,
            carry_bonus,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_rollover_keeps_the_remainder() {
        // xp 9 of 10, a 3-point award crosses once: xp 2, threshold
        // floor(10 * 1.4) + 2 = 16.
        let mut xp = 9u32;
        let mut threshold = 10u32;
        xp += 3;
        assert!(xp >= threshold);
        xp -= threshold;
        threshold = next_threshold(threshold, 1.4, 2);
        assert_eq!(xp, 2);
        assert_eq!(threshold, 16);
    }

    #[test]
    fn large_award_crosses_several_thresholds() {
        let mut xp = 30u32;
        let mut threshold = 10u32;
        let mut crossings = 0;
        while xp >= threshold {
            xp -= threshold;
            threshold = next_threshold(threshold, 1.4, 2);
            crossings += 1;
        }
        // 30 -> 20 (threshold 16) -> 4 (threshold 24)
        assert_eq!(crossings, 2);
        assert_eq!(xp, 4);
        assert_eq!(threshold, 24);
    }

    #[test]
    fn threshold_growth_is_monotonic() {
        let mut t = 10u32;
        for _ in 0..12 {
            let n = next_threshold(t, 1.4, 2);
            assert!(n > t);
            t = n;
        }
    }
}
