use super::*;
use rand::prelude::*;

/// Uniformly random colors from a seeded small RNG, the same seed always gives the same sequence.
#[derive(Clone, Debug)]
pub struct RandomSequenceGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomSequenceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl SequenceGenerator for RandomSequenceGenerator {
    fn next_color(&mut self) -> ColorId {
        ColorId::from_index(self.rng.random_range(0..ColorId::ALL.len()))
    }
}
