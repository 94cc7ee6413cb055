use crate::error::ConfigError;

/// Configuration for the [`Testbed`](crate::testbed::Testbed)
///
/// Every field is read once when the testbed is built; the testbed owns its copy, so several
/// experiments with different configurations can run side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct TestbedConfig {
    /// Number of bandit arms
    ///
    /// **Default**: `10`
    pub arms: usize,
    /// Step size of the constant step-size estimator, in `(0, 1]`
    ///
    /// **Default**: `0.1`
    pub alpha: f64,
    /// Steps per run
    ///
    /// **Default**: `10000`
    pub time_steps: usize,
    /// Independent runs averaged into each curve
    ///
    /// **Default**: `3000`
    pub runs: usize,
    /// Standard deviation of the per-step random walk applied to every true value
    ///
    /// **Default**: `0.01`
    pub sigma_walk: f64,
    /// Standard deviation of the reward noise around an arm's true value
    ///
    /// **Default**: `0.5`
    pub reward_std: f64,
    /// Leading steps dropped from every reported series
    ///
    /// **Default**: `100`
    pub warmup: usize,
    /// Exploration rates compared by [`Testbed::sweep`](crate::testbed::Testbed::sweep)
    ///
    /// **Default**: `[0.0, 0.01, 0.1]`
    pub epsilons: Vec<f64>,
    /// Base seed; `None` seeds from OS entropy once per experiment
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for TestbedConfig {
    fn default() -> Self {
        Self {
            arms: 10,
            alpha: 0.1,
            time_steps: 10_000,
            runs: 3000,
            sigma_walk: 0.01,
            reward_std: 0.5,
            warmup: 100,
            epsilons: vec![0.0, 0.01, 0.1],
            seed: None,
        }
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    range: &'static str,
    ok: impl Fn(f64) -> bool,
) -> Result<(), ConfigError> {
    ok(value)
        .then_some(())
        .ok_or(ConfigError::OutOfRange { name, value, range })
}

impl TestbedConfig {
    /// Check every field, returning the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arms == 0 {
            return Err(ConfigError::Empty("arms"));
        }
        if self.runs == 0 {
            return Err(ConfigError::Empty("runs"));
        }
        if self.time_steps <= self.warmup {
            return Err(ConfigError::WarmupTooLong {
                time_steps: self.time_steps,
                warmup: self.warmup,
            });
        }
        check_range("alpha", self.alpha, "(0, 1]", |a| a > 0.0 && a <= 1.0)?;
        check_range("sigma_walk", self.sigma_walk, "[0, inf)", |s| {
            s.is_finite() && s >= 0.0
        })?;
        check_range("reward_std", self.reward_std, "[0, inf)", |s| {
            s.is_finite() && s >= 0.0
        })?;
        for &epsilon in &self.epsilons {
            check_range("epsilon", epsilon, "[0, 1]", |e| (0.0..=1.0).contains(&e))?;
        }
        Ok(())
    }
}
