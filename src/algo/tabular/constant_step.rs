use crate::assert_interval;

use super::ValueEstimator;

/// Constant step-size estimator
///
/// The values are updated using the update rule:
///
/// Q<sub>n+1</sub> = Q<sub>n</sub> + α(R<sub>n</sub> - Q<sub>n</sub>)
///
/// with a fixed α. Past rewards decay geometrically by (1 - α) per visit, so the estimate keeps
/// following a drifting true value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantStep {
    values: Vec<f64>,
    alpha: f64,
}

impl ConstantStep {
    /// **Panics** if `alpha` is not in the interval `(0,1]`
    pub fn new(arms: usize, alpha: f64) -> Self {
        assert_interval!(alpha, 0.0, 1.0);
        assert!(alpha > 0.0, "Step size `alpha` must be positive.");
        Self {
            values: vec![0.0; arms],
            alpha,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl ValueEstimator for ConstantStep {
    fn update(&mut self, arm: usize, reward: f64) {
        let value = &mut self.values[arm];
        *value += self.alpha * (reward - *value);
    }

    fn estimates(&self) -> &[f64] {
        &self.values
    }

    fn reset(&mut self) {
        self.values.fill(0.0);
    }
}
