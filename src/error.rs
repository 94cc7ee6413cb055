use thiserror::Error;

/// A testbed configuration that cannot produce a meaningful experiment
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`time_steps` ({time_steps}) must exceed `warmup` ({warmup}), otherwise every reported series is empty")]
    WarmupTooLong { time_steps: usize, warmup: usize },
    #[error("`{0}` must be at least 1")]
    Empty(&'static str),
    #[error("invalid value for `{name}`: {value} is not in {range}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
}
