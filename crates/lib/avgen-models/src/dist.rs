use rand::Rng;
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64Mcg;
use serde::Deserialize;

/// A closed pair of uniform sampling bounds.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Draw one value from the given stream. Bounds must satisfy min < max.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }
}

/// A uniform sampler that owns its own seeded stream. Used where a model
/// draws independently of the capture loop's streams, such as sensor noise.
#[derive(Debug, Clone)]
pub struct RangeSampler {
    dist: Uniform<f64>,
    rng: Pcg64Mcg,
}

impl RangeSampler {
    pub fn new(range: UniformRange, seed: u64) -> Self {
        Self {
            dist: Uniform::new(range.min, range.max),
            rng: Pcg64Mcg::new(seed as u128),
        }
    }

    pub fn sample(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}
