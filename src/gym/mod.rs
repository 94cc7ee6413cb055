pub mod drifting_bandit;

pub use drifting_bandit::DriftingBandit;
