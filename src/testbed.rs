use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::{
    algo::tabular::{ConstantStep, EstimatorKind, SampleAverage, ValueEstimator},
    config::TestbedConfig,
    env::Environment,
    error::ConfigError,
    exploration::EpsilonGreedy,
    gym::DriftingBandit,
    rng::RandomSource,
    stats::{Curves, StepTotals},
};

/// Runs folded into one set of partial totals before merging
const CHUNK_RUNS: usize = 64;

/// Steps averaged by the summary logged after each experiment
const SUMMARY_TAIL: usize = 1000;

/// Curves for one `(epsilon, estimator)` pair of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub epsilon: f64,
    pub kind: EstimatorKind,
    pub curves: Curves,
}

impl Comparison {
    /// Series label, the estimator's display name
    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}

/// Monte-Carlo testbed for epsilon-greedy agents on a [`DriftingBandit`]
///
/// Each run builds a fresh bandit and estimator, plays `time_steps` steps, and adds its per-step
/// outcomes to the experiment totals. Run `i` always draws from
/// [`RandomSource::for_run(seed, i)`](RandomSource::for_run), and partial totals are merged in
/// run order, so a seeded experiment gives identical curves with or without the `parallel`
/// feature.
#[derive(Debug, Clone)]
pub struct Testbed {
    config: TestbedConfig,
    seed: u64,
}

impl Testbed {
    /// Validate `config` and build a testbed
    ///
    /// Without a configured seed, one is drawn from OS entropy here and reused for every
    /// experiment of this testbed.
    pub fn new(config: TestbedConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self { config, seed })
    }

    pub fn config(&self) -> &TestbedConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the full experiment for one exploration rate and estimator
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn run(&self, epsilon: f64, kind: EstimatorKind) -> Curves {
        let TestbedConfig {
            arms,
            alpha,
            runs,
            time_steps,
            warmup,
            ..
        } = self.config;
        info!("Running {kind} with epsilon {epsilon}: {runs} runs x {time_steps} steps");

        let policy = EpsilonGreedy::new(epsilon);
        let totals = match kind {
            EstimatorKind::SampleAverage => self.accumulate(&policy, || SampleAverage::new(arms)),
            EstimatorKind::ConstantStep => {
                self.accumulate(&policy, || ConstantStep::new(arms, alpha))
            }
        };
        let curves = totals.finalize(runs, warmup);

        let (reward, optimal, switches) = curves.tail_mean(SUMMARY_TAIL);
        info!(
            "{kind} (epsilon {epsilon}), last {} steps: reward {reward:.3}, optimal {optimal:.1}%, switch {switches:.1}%",
            SUMMARY_TAIL.min(curves.len())
        );
        curves
    }

    /// Run every configured epsilon against both estimators
    pub fn sweep(&self) -> Vec<Comparison> {
        self.config
            .epsilons
            .iter()
            .flat_map(|&epsilon| {
                EstimatorKind::iter().map(move |kind| Comparison {
                    epsilon,
                    kind,
                    curves: self.run(epsilon, kind),
                })
            })
            .collect()
    }

    /// Play a single run and return its raw, unnormalized per-step outcomes
    ///
    /// The run is identical to run `run` of [`Testbed::run`] with the same arguments.
    pub fn simulate_run(&self, run: usize, epsilon: f64, kind: EstimatorKind) -> StepTotals {
        let TestbedConfig {
            arms,
            alpha,
            sigma_walk,
            reward_std,
            time_steps,
            ..
        } = self.config;
        let policy = EpsilonGreedy::new(epsilon);
        let mut env = DriftingBandit::new(arms, sigma_walk, reward_std);
        let mut totals = StepTotals::new(time_steps);
        match kind {
            EstimatorKind::SampleAverage => {
                let mut estimator = SampleAverage::new(arms);
                self.play(run, &mut env, &mut estimator, &policy, &mut totals);
            }
            EstimatorKind::ConstantStep => {
                let mut estimator = ConstantStep::new(arms, alpha);
                self.play(run, &mut env, &mut estimator, &policy, &mut totals);
            }
        }
        totals
    }

    /// Play all runs, chunk by chunk, and merge the partial totals in chunk order
    fn accumulate<V, F>(&self, policy: &EpsilonGreedy, make_estimator: F) -> StepTotals
    where
        V: ValueEstimator,
        F: Fn() -> V + Sync,
    {
        let TestbedConfig {
            arms,
            sigma_walk,
            reward_std,
            time_steps,
            runs,
            ..
        } = self.config;

        let simulate_chunk = |chunk: usize| {
            let mut env = DriftingBandit::new(arms, sigma_walk, reward_std);
            let mut estimator = make_estimator();
            let mut totals = StepTotals::new(time_steps);
            let start = chunk * CHUNK_RUNS;
            let end = (start + CHUNK_RUNS).min(runs);
            for run in start..end {
                if run % 100 == 0 {
                    debug!("Run {run}/{runs}");
                }
                self.play(run, &mut env, &mut estimator, policy, &mut totals);
            }
            totals
        };

        let chunks = runs.div_ceil(CHUNK_RUNS);
        #[cfg(feature = "parallel")]
        let partials: Vec<StepTotals> = (0..chunks).into_par_iter().map(simulate_chunk).collect();
        #[cfg(not(feature = "parallel"))]
        let partials: Vec<StepTotals> = (0..chunks).map(simulate_chunk).collect();

        let mut totals = StepTotals::new(time_steps);
        for partial in &partials {
            totals.merge(partial);
        }
        totals
    }

    /// Play run `run` from a fresh start, adding each step's outcome to `totals`
    fn play<E, V>(
        &self,
        run: usize,
        env: &mut E,
        estimator: &mut V,
        policy: &EpsilonGreedy,
        totals: &mut StepTotals,
    ) where
        E: Environment,
        V: ValueEstimator,
    {
        let mut rng = RandomSource::for_run(self.seed, run);
        env.reset();
        estimator.reset();
        let mut last_action: Option<usize> = None;

        for t in 0..totals.len() {
            let action = policy.select(estimator.estimates(), &mut rng);
            let was_switch = last_action.is_some_and(|last| last != action);
            last_action = Some(action);
            let was_optimal = env.is_optimal(action);

            // reward is drawn before the walk, so it reflects this step's true values
            let reward = env.sample_reward(action, &mut rng);
            totals.record_step(t, reward, was_optimal, was_switch);
            estimator.update(action, reward);
            env.drift(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> TestbedConfig {
        TestbedConfig {
            time_steps: 300,
            runs: 20,
            seed: Some(17),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let config = TestbedConfig {
            time_steps: 100,
            ..Default::default()
        };
        assert!(matches!(
            Testbed::new(config),
            Err(ConfigError::WarmupTooLong { .. })
        ));
    }

    #[test]
    fn tied_arms_are_always_optimal() {
        let testbed = Testbed::new(TestbedConfig {
            runs: 1,
            time_steps: 200,
            sigma_walk: 0.0,
            seed: Some(1),
            ..Default::default()
        })
        .unwrap();
        for kind in EstimatorKind::iter() {
            let curves = testbed.run(1.0, kind);
            assert_eq!(curves.len(), 100, "warmup dropped");
            assert!(
                curves.optimal_pct.iter().all(|&p| p == 100.0),
                "every pick is tied-optimal ({kind})"
            );
        }
    }

    #[test]
    fn switches_never_on_first_step() {
        let testbed = Testbed::new(small_config()).unwrap();
        let steps = testbed.config().time_steps;
        for run in 0..10 {
            for epsilon in [0.0, 0.1, 1.0] {
                let trace = testbed.simulate_run(run, epsilon, EstimatorKind::ConstantStep);
                assert_eq!(trace.switch_counts()[0], 0, "no switch on the first step");
                let switches: u32 = trace.switch_counts().iter().sum();
                assert!(switches as usize <= steps - 1, "at most one switch per later step");
            }
        }

        let trace = testbed.simulate_run(0, 1.0, EstimatorKind::SampleAverage);
        let switches: u32 = trace.switch_counts().iter().sum();
        assert!(switches > 200, "uniform exploration switches about 90% of the time");
    }

    #[test]
    fn run_matches_sum_of_single_runs() {
        let testbed = Testbed::new(small_config()).unwrap();
        for kind in EstimatorKind::iter() {
            let mut totals = StepTotals::new(testbed.config().time_steps);
            for run in 0..testbed.config().runs {
                totals.merge(&testbed.simulate_run(run, 0.1, kind));
            }
            assert_eq!(
                testbed.run(0.1, kind),
                totals.finalize(testbed.config().runs, testbed.config().warmup),
                "chunked run equals sequential runs ({kind})"
            );
        }
    }

    #[test]
    fn seeded_runs_reproduce() {
        let config = TestbedConfig {
            runs: 150,
            ..small_config()
        };
        let a = Testbed::new(config.clone()).unwrap();
        let b = Testbed::new(config.clone()).unwrap();
        assert_eq!(
            a.run(0.1, EstimatorKind::SampleAverage),
            b.run(0.1, EstimatorKind::SampleAverage),
            "same seed, same curves"
        );

        let c = Testbed::new(TestbedConfig {
            seed: Some(18),
            ..config
        })
        .unwrap();
        assert_ne!(
            a.run(0.1, EstimatorKind::SampleAverage),
            c.run(0.1, EstimatorKind::SampleAverage),
            "different seed, different curves"
        );
    }

    #[test]
    fn adjacent_seeds_play_different_runs() {
        let a = Testbed::new(small_config()).unwrap();
        let b = Testbed::new(TestbedConfig {
            seed: Some(18),
            ..small_config()
        })
        .unwrap();
        for run in 0..19 {
            assert_ne!(
                a.simulate_run(run + 1, 0.1, EstimatorKind::ConstantStep),
                b.simulate_run(run, 0.1, EstimatorKind::ConstantStep),
                "run {} of seed 17 is not run {run} of seed 18",
                run + 1
            );
        }
    }

    #[test]
    fn sweep_covers_every_pair() {
        let testbed = Testbed::new(TestbedConfig {
            epsilons: vec![0.0, 0.1],
            runs: 4,
            time_steps: 150,
            seed: Some(3),
            ..Default::default()
        })
        .unwrap();
        let results = testbed.sweep();
        let keys = results
            .iter()
            .map(|c| (c.epsilon, c.label()))
            .collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                (0.0, "Sample Avg".to_string()),
                (0.0, "Const Step".to_string()),
                (0.1, "Sample Avg".to_string()),
                (0.1, "Const Step".to_string()),
            ]
        );
        assert!(results.iter().all(|c| c.curves.len() == 50), "warmup dropped");
    }

    #[test]
    fn constant_step_tracks_drift_better() {
        let testbed = Testbed::new(TestbedConfig {
            runs: 200,
            time_steps: 2000,
            sigma_walk: 0.05,
            seed: Some(2024),
            ..Default::default()
        })
        .unwrap();
        let (_, sample_avg, _) = testbed.run(0.1, EstimatorKind::SampleAverage).tail_mean(500);
        let (_, const_step, _) = testbed.run(0.1, EstimatorKind::ConstantStep).tail_mean(500);
        assert!(
            const_step > sample_avg,
            "constant step {const_step:.1}% vs sample average {sample_avg:.1}%"
        );
    }
}
