use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// The single source of randomness in a simulation
///
/// Wraps a seedable [`ChaCha8Rng`] so that a whole experiment can be replayed from one seed.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: ChaCha8Rng,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Independent stream for run `run` of an experiment seeded with `base_seed`
    ///
    /// The seed picks the ChaCha key and the run picks the stream under that key, so no two
    /// `(base_seed, run)` pairs share a stream. The stream depends only on the pair, never on
    /// which thread executes the run.
    pub fn for_run(base_seed: u64, run: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(base_seed);
        rng.set_stream(run as u64);
        Self { rng }
    }

    /// Uniform draw in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform draw in `[0, n)`
    ///
    /// **Panics** if `n` is zero
    pub fn index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }

    /// Gaussian draw with the given mean and standard deviation
    ///
    /// A standard deviation of zero returns `mean` exactly.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }
}
