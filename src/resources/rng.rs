//! Seeded pseudo-random source.
//!
//! Every stochastic decision in the core (spawn timing, shelf choice, sale
//! price, customer speed, level-up carry bonus) draws from this single
//! resource, so a run replays exactly from its seed.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug)]
pub struct SimRng(fastrand::Rng);

impl SimRng {
    pub fn seeded(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }

    /// Uniform float in `[min, max)`.
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.0.f32() * (max - min)
    }

    /// Uniform integer in `min..=max`.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        self.0.u32(min..=max)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.0.f32() < p
    }

    /// Uniformly chosen element of a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.0.usize(0..items.len()))
        }
    }
}
