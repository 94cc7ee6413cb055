/// Per-step totals accumulated over independent runs
///
/// Totals are only ever added to, either one step at a time with [`record_step`](Self::record_step)
/// or in bulk with [`merge`](Self::merge), so the result does not depend on the order in which
/// runs are folded in (up to floating-point summation order).
#[derive(Debug, Clone, PartialEq)]
pub struct StepTotals {
    reward: Vec<f64>,
    optimal: Vec<u32>,
    switches: Vec<u32>,
}

impl StepTotals {
    pub fn new(time_steps: usize) -> Self {
        Self {
            reward: vec![0.0; time_steps],
            optimal: vec![0; time_steps],
            switches: vec![0; time_steps],
        }
    }

    /// Number of steps tracked
    pub fn len(&self) -> usize {
        self.reward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reward.is_empty()
    }

    /// Add one run's outcome at step `t`
    pub fn record_step(&mut self, t: usize, reward: f64, was_optimal: bool, was_switch: bool) {
        self.reward[t] += reward;
        self.optimal[t] += was_optimal as u32;
        self.switches[t] += was_switch as u32;
    }

    /// Add another set of totals elementwise
    ///
    /// **Panics** if the step counts differ
    pub fn merge(&mut self, other: &StepTotals) {
        assert_eq!(self.len(), other.len(), "Cannot merge totals of different lengths.");
        for (a, b) in self.reward.iter_mut().zip(&other.reward) {
            *a += b;
        }
        for (a, b) in self.optimal.iter_mut().zip(&other.optimal) {
            *a += b;
        }
        for (a, b) in self.switches.iter_mut().zip(&other.switches) {
            *a += b;
        }
    }

    pub fn reward(&self) -> &[f64] {
        &self.reward
    }

    pub fn optimal_counts(&self) -> &[u32] {
        &self.optimal
    }

    pub fn switch_counts(&self) -> &[u32] {
        &self.switches
    }

    /// Normalize totals over `runs` runs into reported curves, dropping the first `warmup` steps
    ///
    /// **Panics** if `runs` is zero or `warmup` leaves no steps
    pub fn finalize(&self, runs: usize, warmup: usize) -> Curves {
        assert!(runs > 0, "Cannot normalize over zero runs.");
        assert!(
            warmup < self.len(),
            "Warmup of {} leaves no steps out of {}.",
            warmup,
            self.len()
        );
        let n = runs as f64;
        let percent = |counts: &[u32]| -> Vec<f64> {
            counts[warmup..]
                .iter()
                .map(|&c| c as f64 / n * 100.0)
                .collect()
        };
        Curves {
            avg_reward: self.reward[warmup..].iter().map(|&r| r / n).collect(),
            optimal_pct: percent(&self.optimal),
            switch_pct: percent(&self.switches),
        }
    }
}

/// The three normalized series reported for one experiment
///
/// Index `i` of each series corresponds to step `warmup + i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curves {
    /// Average reward per step
    pub avg_reward: Vec<f64>,
    /// Percentage of runs that picked an optimal arm, per step
    pub optimal_pct: Vec<f64>,
    /// Percentage of runs that switched arms, per step
    pub switch_pct: Vec<f64>,
}

impl Curves {
    pub fn len(&self) -> usize {
        self.avg_reward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avg_reward.is_empty()
    }

    /// Means of the last `n` samples of each series
    ///
    /// **Returns** `(avg_reward, optimal_pct, switch_pct)`
    pub fn tail_mean(&self, n: usize) -> (f64, f64, f64) {
        let n = n.clamp(1, self.len().max(1));
        let mean = |series: &[f64]| {
            let tail = &series[series.len().saturating_sub(n)..];
            tail.iter().sum::<f64>() / tail.len().max(1) as f64
        };
        (
            mean(&self.avg_reward),
            mean(&self.optimal_pct),
            mean(&self.switch_pct),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_finalize() {
        let mut totals = StepTotals::new(4);
        totals.record_step(0, 1.0, true, false);
        totals.record_step(1, 2.0, false, true);
        totals.record_step(1, 0.5, true, true);
        totals.record_step(3, -1.0, true, false);

        assert_eq!(totals.reward(), [1.0, 2.5, 0.0, -1.0]);
        assert_eq!(totals.optimal_counts(), [1, 1, 0, 1]);
        assert_eq!(totals.switch_counts(), [0, 2, 0, 0]);

        let curves = totals.finalize(2, 1);
        assert_eq!(curves.len(), 3, "warmup dropped from the front");
        assert_eq!(curves.avg_reward, [1.25, 0.0, -0.5]);
        assert_eq!(curves.optimal_pct, [50.0, 0.0, 50.0]);
        assert_eq!(curves.switch_pct, [100.0, 0.0, 0.0]);
    }

    #[test]
    fn default_lengths() {
        let curves = StepTotals::new(10_000).finalize(3000, 100);
        assert_eq!(curves.avg_reward.len(), 9900);
        assert_eq!(curves.optimal_pct.len(), 9900);
        assert_eq!(curves.switch_pct.len(), 9900);
    }

    #[test]
    fn merge_is_additive() {
        let mut a = StepTotals::new(2);
        a.record_step(0, 1.0, true, false);
        let mut b = StepTotals::new(2);
        b.record_step(0, 2.0, false, false);
        b.record_step(1, 3.0, true, true);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba, "merge order does not matter");
        assert_eq!(ab.reward(), [3.0, 3.0]);
        assert_eq!(ab.optimal_counts(), [1, 1]);
        assert_eq!(ab.switch_counts(), [0, 1]);
    }

    #[test]
    #[should_panic(expected = "leaves no steps")]
    fn finalize_rejects_full_warmup() {
        StepTotals::new(100).finalize(1, 100);
    }

    #[test]
    fn tail_mean_functional() {
        let curves = Curves {
            avg_reward: vec![0.0, 1.0, 3.0],
            optimal_pct: vec![10.0, 20.0, 40.0],
            switch_pct: vec![5.0, 5.0, 5.0],
        };
        assert_eq!(curves.tail_mean(2), (2.0, 30.0, 5.0));
        assert_eq!(curves.tail_mean(50), (4.0 / 3.0, 70.0 / 3.0, 5.0), "clamped to length");
    }
}
