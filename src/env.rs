use crate::rng::RandomSource;

/// A multi-armed bandit whose hidden true values may change between steps.
///
/// Actions are arm indices in `[0, arms())`. Within one step the caller queries the optimal arm,
/// samples a reward for the chosen arm, and then calls [`drift`](Environment::drift) exactly
/// once, so the reward always reflects the pre-drift true value.
pub trait Environment {
    /// Number of arms
    fn arms(&self) -> usize;

    /// Current true value of every arm
    fn true_values(&self) -> &[f64];

    /// Restore the initial true values at the start of a run
    fn reset(&mut self);

    /// The arm with the highest true value, ties going to the lowest index
    fn optimal_arm(&self) -> usize;

    /// Whether `arm` currently shares the highest true value
    ///
    /// Agrees with `arm == self.optimal_arm()` whenever the maximum is unique. The two differ only
    /// when several arms tie for the maximum: after a reset, and on every step when the bandit
    /// does not drift (`sigma_walk = 0`), where every tied arm counts as optimal.
    fn is_optimal(&self, arm: usize) -> bool {
        let values = self.true_values();
        values[arm] >= values[self.optimal_arm()]
    }

    /// Draw a reward for pulling `arm`, without changing the true values
    fn sample_reward(&self, arm: usize, rng: &mut RandomSource) -> f64;

    /// Advance the true values by one step
    fn drift(&mut self, rng: &mut RandomSource);
}
