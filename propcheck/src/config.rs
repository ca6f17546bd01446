//! Run parameters and global defaults.

use crate::error::ConfigError;
use crate::rng::RandomState;

/// Environment variable overriding [`GlobalConfig::default_trials`]
pub const TRIALS_ENV: &str = "PROPCHECK_TRIALS";
/// Environment variable pinning [`GlobalConfig::default_seed`]
pub const SEED_ENV: &str = "PROPCHECK_SEED";

/// Trial count and starting state for one property run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct RunParameters {
    /// Number of trials to run
    pub trials: usize,
    /// State the first trial draws from
    pub state: RandomState,
}

impl RunParameters {
    /// Create run parameters with validation
    pub fn new(trials: usize, state: RandomState) -> Result<Self, ConfigError> {
        let params = Self { trials, state };
        params.validate()?;
        Ok(params)
    }

    /// Create run parameters from a literal seed
    pub fn with_seed(trials: usize, seed: i64) -> Result<Self, ConfigError> {
        Self::new(trials, RandomState::new(seed))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrials(self.trials));
        }
        Ok(())
    }
}

/// Defaults applied when a run does not specify its own parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Default number of trials
    pub default_trials: usize,
    /// Fixed seed for reproducible runs; the wall clock is used when unset
    pub default_seed: Option<i64>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_trials: 100,
            default_seed: None,
        }
    }
}

impl GlobalConfig {
    /// Create a new global configuration with validation
    pub fn new(default_trials: usize, default_seed: Option<i64>) -> Result<Self, ConfigError> {
        let config = Self {
            default_trials,
            default_seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_trials == 0 {
            return Err(ConfigError::InvalidTrials(self.default_trials));
        }
        Ok(())
    }

    /// Defaults overridden by `PROPCHECK_TRIALS` and `PROPCHECK_SEED`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the two variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(TRIALS_ENV) {
            config.default_trials = parse_env(TRIALS_ENV, &value)?;
        }
        if let Some(value) = lookup(SEED_ENV) {
            config.default_seed = Some(parse_env(SEED_ENV, &value)?);
        }
        config.validate()?;
        Ok(config)
    }

    /// Parameters for a run: the configured seed, or the wall clock
    pub fn run_parameters(&self) -> RunParameters {
        let state = match self.default_seed {
            Some(seed) => RandomState::new(seed),
            None => RandomState::from_clock(),
        };
        RunParameters {
            trials: self.default_trials,
            state,
        }
    }
}

fn parse_env<T: std::str::FromStr>(variable: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnvValue {
            variable: variable.to_string(),
            value: value.to_string(),
        })
}
