use crate::{assert_interval, rng::RandomSource, util::argmax};

use super::Choice;

/// Epsilon greedy exploration policy with a fixed epsilon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// Initialize epsilon greedy policy with exploration rate `epsilon`
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Decide whether to explore or exploit on this step
    ///
    /// A zero epsilon always exploits and consumes no randomness.
    pub fn choose(&self, rng: &mut RandomSource) -> Choice {
        if self.epsilon > 0.0 && rng.uniform() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }

    /// Pick an arm given the current value estimates
    ///
    /// Exploring picks uniformly among all arms; exploiting picks the highest estimate,
    /// ties going to the lowest index.
    pub fn select(&self, estimates: &[f64], rng: &mut RandomSource) -> usize {
        match self.choose(rng) {
            Choice::Explore => rng.index(estimates.len()),
            Choice::Exploit => argmax(estimates),
        }
    }
}
