/// Implemented value estimators
pub mod algo;

/// Testbed configuration
pub mod config;

/// Environment
pub mod env;

/// Configuration errors
pub mod error;

/// Exploration policies
pub mod exploration;

/// Testing environments
pub mod gym;

/// Seedable randomness
pub mod rng;

/// Per-step statistics across runs
pub mod stats;

/// Experiment driver
pub mod testbed;

mod util;

pub use config::TestbedConfig;
pub use error::ConfigError;
pub use testbed::{Comparison, Testbed};
pub use util::argmax;
