use strum::{Display, EnumIter};

pub mod constant_step;
pub mod sample_average;

pub use constant_step::ConstantStep;
pub use sample_average::SampleAverage;

/// A per-arm table of action-value estimates learned incrementally from rewards
///
/// The update rule is fixed by the implementing type, so a run loop generic over
/// `ValueEstimator` is monomorphized once per rule.
pub trait ValueEstimator {
    /// Fold one observed `reward` for `arm` into its estimate
    fn update(&mut self, arm: usize, reward: f64);

    /// Current estimate of every arm
    fn estimates(&self) -> &[f64];

    /// Zero all estimates and any per-arm bookkeeping
    fn reset(&mut self);
}

/// The estimator update rules compared by the testbed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EstimatorKind {
    /// [`SampleAverage`]
    #[strum(serialize = "Sample Avg")]
    SampleAverage,
    /// [`ConstantStep`]
    #[strum(serialize = "Const Step")]
    ConstantStep,
}
