//! Properties, their results, and lazy property-level combinators.

use std::fmt;
use std::sync::Arc;

use crate::config::RunParameters;
use crate::error::{AssertionErrors, ConfigError};

/// Diagnostic payload of a failed property run
#[derive(Debug, Clone, PartialEq)]
pub struct Falsified<A> {
    /// Name of the property that failed
    pub name: String,
    /// Raw generator output of the failing trial
    pub failed_case: A,
    /// Trials that passed before the failure
    pub successes: usize,
    /// Raw generator output of the last passing trial, if any passed
    pub last_success_case: Option<A>,
    /// Every error raised by the failing trial's assertions
    pub errors: AssertionErrors,
}

impl<A> Falsified<A> {
    /// Convert the recorded cases with `f`
    pub fn map_case<B, F>(self, f: F) -> Falsified<B>
    where
        F: Fn(A) -> B,
    {
        Falsified {
            name: self.name,
            failed_case: f(self.failed_case),
            successes: self.successes,
            last_success_case: self.last_success_case.map(&f),
            errors: self.errors,
        }
    }
}

impl<A: fmt::Debug> fmt::Display for Falsified<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Falsified {{ name: {}, failed_case: {:?}, successes: {}, ",
            self.name, self.failed_case, self.successes
        )?;
        write!(
            f,
            "last_success_case: {:?}, errors: {} }}",
            self.last_success_case, self.errors
        )
    }
}

/// Outcome of running a property
#[derive(Debug, Clone, PartialEq)]
pub enum RunResult<A> {
    Passed,
    Falsified(Falsified<A>),
}

impl<A> RunResult<A> {
    pub fn is_passed(&self) -> bool {
        matches!(self, RunResult::Passed)
    }

    pub fn is_falsified(&self) -> bool {
        matches!(self, RunResult::Falsified(_))
    }

    pub fn falsified(&self) -> Option<&Falsified<A>> {
        match self {
            RunResult::Passed => None,
            RunResult::Falsified(falsified) => Some(falsified),
        }
    }

    pub fn into_falsified(self) -> Option<Falsified<A>> {
        match self {
            RunResult::Passed => None,
            RunResult::Falsified(falsified) => Some(falsified),
        }
    }

    /// Convert the cases carried by a falsified result
    pub fn map_case<B, F>(self, f: F) -> RunResult<B>
    where
        F: Fn(A) -> B,
    {
        match self {
            RunResult::Passed => RunResult::Passed,
            RunResult::Falsified(falsified) => RunResult::Falsified(falsified.map_case(f)),
        }
    }
}

impl<A: fmt::Debug> fmt::Display for RunResult<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunResult::Passed => write!(f, "Passed"),
            RunResult::Falsified(falsified) => write!(f, "{}", falsified),
        }
    }
}

type RunFn<A> = dyn Fn(&RunParameters) -> RunResult<A> + Send + Sync;

/// A named, repeatable check whose failures report inputs of type `A`
pub struct Property<A> {
    name: String,
    run: Arc<RunFn<A>>,
}

impl<A> Clone for Property<A> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            run: Arc::clone(&self.run),
        }
    }
}

impl<A> fmt::Debug for Property<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

impl<A: 'static> Property<A> {
    pub fn new<F>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(&RunParameters) -> RunResult<A> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            run: Arc::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, params: &RunParameters) -> RunResult<A> {
        (self.run)(params)
    }

    /// Validate the parameters and run
    pub fn check(&self, trials: usize, seed: i64) -> Result<RunResult<A>, ConfigError> {
        let params = RunParameters::with_seed(trials, seed)?;
        Ok(self.run(&params))
    }

    /// See [`and`]
    pub fn and(self, other: Property<A>) -> Property<A> {
        and(self, other)
    }

    /// See [`or`]
    pub fn or(self, other: Property<A>) -> Property<A> {
        or(self, other)
    }

    /// Report failing cases through their `Debug` text, so properties over
    /// different input types can be combined
    pub fn erased(self) -> Property<String>
    where
        A: fmt::Debug,
    {
        let name = self.name.clone();
        Property::new(name, move |params| {
            self.run(params).map_case(|case| format!("{:?}", case))
        })
    }
}

/// Run `p1`; only when it passes, run `p2` and return its result
pub fn and<A: 'static>(p1: Property<A>, p2: Property<A>) -> Property<A> {
    let name = p1.name.clone();
    Property::new(name, move |params| match p1.run(params) {
        RunResult::Passed => p2.run(params),
        falsified => falsified,
    })
}

/// Run `p1`; only when it is falsified, run `p2` and return its result
pub fn or<A: 'static>(p1: Property<A>, p2: Property<A>) -> Property<A> {
    let name = p1.name.clone();
    Property::new(name, move |params| match p1.run(params) {
        RunResult::Passed => RunResult::Passed,
        RunResult::Falsified(_) => p2.run(params),
    })
}
