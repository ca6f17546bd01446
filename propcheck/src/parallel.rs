//! Parallel execution of a property across worker threads.
//!
//! The trial budget is split between workers, and worker `i` draws from
//! [`RandomState::derive`]`(i)` of the starting state. Results are merged in
//! worker order, so the outcome depends only on the parameters and the
//! thread count, never on scheduling.
//!
//! [`RandomState::derive`]: crate::rng::RandomState::derive

use tracing::{debug, trace};

use crate::config::RunParameters;
use crate::error::ConfigError;
use crate::property::{Property, RunResult};

/// Configuration for parallel execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of worker threads
    pub num_threads: usize,
    /// Runs with fewer trials than this stay on the calling thread
    pub batch_size: usize,
    /// Whether to enable parallel execution
    pub enabled: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_threads: num_cpus::get(),
            batch_size: 10,
            enabled: true,
        }
    }
}

impl ParallelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads == 0 {
            return Err(ConfigError::InvalidThreads(self.num_threads));
        }
        Ok(())
    }
}

/// Run `property` with its trials spread over `config.num_threads` workers.
///
/// A falsified result reports the failure of the lowest-indexed failing
/// worker; its `successes` count includes every trial of the workers before it.
/// A panic inside a worker is resumed on the calling thread.
pub fn run_parallel<A: Send + 'static>(
    property: &Property<A>,
    params: &RunParameters,
    config: &ParallelConfig,
) -> Result<RunResult<A>, ConfigError> {
    params.validate()?;
    config.validate()?;

    if !config.enabled || params.trials < config.batch_size {
        return Ok(property.run(params));
    }

    let workers = config.num_threads.min(params.trials);
    let per_worker = params.trials / workers;
    let remainder = params.trials % workers;
    let shares: Vec<RunParameters> = (0..workers)
        .map(|index| RunParameters {
            trials: per_worker + usize::from(index < remainder),
            state: params.state.derive(index),
        })
        .collect();

    debug!(
        property = property.name(),
        trials = params.trials,
        workers,
        "running property in parallel"
    );

    let joined = crossbeam::scope(|scope| {
        let handles: Vec<_> = shares
            .iter()
            .enumerate()
            .map(|(index, share)| {
                scope.spawn(move |_| {
                    trace!(worker = index, trials = share.trials, "worker started");
                    property.run(share)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    });

    let results = match joined {
        Ok(results) => results,
        Err(payload) => std::panic::resume_unwind(payload),
    };

    let mut completed = 0;
    for (share, result) in shares.iter().zip(results) {
        match result {
            Ok(RunResult::Passed) => completed += share.trials,
            Ok(RunResult::Falsified(mut falsified)) => {
                falsified.successes += completed;
                return Ok(RunResult::Falsified(falsified));
            }
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
    Ok(RunResult::Passed)
}
