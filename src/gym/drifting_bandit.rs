use crate::{env::Environment, rng::RandomSource, util::argmax};

/// Nonstationary K-armed bandit environment
///
/// Every arm starts with a true value of zero. Each step, every arm's true value takes an
/// independent Gaussian random-walk step with standard deviation `sigma_walk`, whichever arm was
/// pulled. Pulling an arm yields a reward drawn from a normal distribution centred on its
/// current true value with standard deviation `reward_std`.
#[derive(Debug, Clone)]
pub struct DriftingBandit {
    true_values: Vec<f64>,
    sigma_walk: f64,
    reward_std: f64,
}

impl DriftingBandit {
    /// Initialize a new bandit with `arms` arms, all true values at zero
    ///
    /// **Panics** if `arms` is zero
    pub fn new(arms: usize, sigma_walk: f64, reward_std: f64) -> Self {
        assert!(arms > 0, "A bandit needs at least one arm.");
        Self {
            true_values: vec![0.0; arms],
            sigma_walk,
            reward_std,
        }
    }
}

impl Environment for DriftingBandit {
    fn arms(&self) -> usize {
        self.true_values.len()
    }

    fn true_values(&self) -> &[f64] {
        &self.true_values
    }

    fn reset(&mut self) {
        self.true_values.fill(0.0);
    }

    fn optimal_arm(&self) -> usize {
        argmax(&self.true_values)
    }

    fn sample_reward(&self, arm: usize, rng: &mut RandomSource) -> f64 {
        assert!(arm < self.arms(), "Invalid arm: {}", arm);
        rng.gaussian(self.true_values[arm], self.reward_std)
    }

    fn drift(&mut self, rng: &mut RandomSource) {
        for value in self.true_values.iter_mut() {
            *value += rng.gaussian(0.0, self.sigma_walk);
        }
    }
}
