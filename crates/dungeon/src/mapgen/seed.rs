//! Seeded random stream for map generation.

use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

pub(super) struct MapRng {
    inner: ChaCha8Rng,
}

impl MapRng {
    pub(super) fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Uniform in `min_value..=max_value`.
    pub(super) fn range_inclusive(&mut self, min_value: usize, max_value: usize) -> usize {
        debug_assert!(min_value <= max_value);
        let range_size = max_value - min_value + 1;
        min_value + (self.inner.next_u64() as usize % range_size)
    }

    /// Uniform in `0..upper`; `upper` must be non-zero.
    pub(super) fn below(&mut self, upper: usize) -> usize {
        debug_assert!(upper > 0);
        self.inner.next_u64() as usize % upper
    }

    pub(super) fn chance(&mut self, probability: f32) -> bool {
        let unit = (self.inner.next_u64() >> 11) as f64 / (1_u64 << 53) as f64;
        unit < f64::from(probability)
    }

    pub(super) fn shuffle<T>(&mut self, items: &mut [T]) {
        let len = items.len();
        for index in 0..len {
            let pick = index + self.below(len - index);
            items.swap(index, pick);
        }
    }
}
