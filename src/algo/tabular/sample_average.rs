use super::ValueEstimator;

/// Sample-average estimator
///
/// Each estimate is the plain mean of every reward observed for that arm, maintained
/// incrementally:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + (R<sub>n</sub> - Q<sub>n</sub>) / n
///
/// where n is the arm's visit count including the current reward. All rewards weigh the same,
/// so the estimate reacts ever more slowly as n grows.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleAverage {
    values: Vec<f64>,
    counts: Vec<u32>,
}

impl SampleAverage {
    pub fn new(arms: usize) -> Self {
        Self {
            values: vec![0.0; arms],
            counts: vec![0; arms],
        }
    }

    /// Number of rewards folded into each estimate since the last reset
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }
}

impl ValueEstimator for SampleAverage {
    fn update(&mut self, arm: usize, reward: f64) {
        self.counts[arm] += 1;
        let value = &mut self.values[arm];
        *value += (reward - *value) / self.counts[arm] as f64;
    }

    fn estimates(&self) -> &[f64] {
        &self.values
    }

    fn reset(&mut self) {
        self.values.fill(0.0);
        self.counts.fill(0);
    }
}
