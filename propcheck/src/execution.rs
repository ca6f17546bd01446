//! The trial loop that turns a generator and assertions into a [`Property`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::assertion::{Assertion, Outcome};
use crate::config::RunParameters;
use crate::generator::Generator;
use crate::property::{Falsified, Property, RunResult};

/// Build a property that checks `assertions` against `transform` of each
/// generated value.
///
/// Each trial draws one value, shapes it with `transform` and runs the
/// assertions in order, stopping at the first that fails. The first failing
/// trial ends the run with a [`Falsified`] result carrying the raw value; the
/// state is advanced one extra step between trials.
pub fn for_all<A, B, T>(
    generator: Generator<A>,
    name: impl Into<String>,
    transform: T,
    assertions: Vec<Assertion<B>>,
) -> Property<A>
where
    A: 'static,
    B: 'static,
    T: Fn(&A) -> B + Send + Sync + 'static,
{
    let name = name.into();
    Property::new(name.clone(), move |params: &RunParameters| {
        debug!(
            property = %name,
            trials = params.trials,
            seed = params.state.seed(),
            "running property"
        );

        let mut state = params.state;
        let mut last_success_case = None;
        for trial in 0..params.trials {
            let (value, next) = generator.sample(state);
            let shaped = transform(&value);
            let outcome: Outcome = assertions.iter().try_for_each(|check| check(&shaped));

            match outcome {
                Ok(()) => last_success_case = Some(value),
                Err(errors) => {
                    info!(
                        property = %name,
                        trial,
                        successes = trial,
                        errors = errors.len(),
                        "property falsified"
                    );
                    return RunResult::Falsified(Falsified {
                        name: name.clone(),
                        failed_case: value,
                        successes: trial,
                        last_success_case,
                        errors,
                    });
                }
            }
            state = next.next().1;
        }

        debug!(property = %name, trials = params.trials, "property passed");
        RunResult::Passed
    })
}

/// Builder form of [`for_all`]
pub struct ForAll<A, B> {
    name: String,
    generator: Generator<A>,
    transform: Arc<dyn Fn(&A) -> B + Send + Sync>,
    assertions: Vec<Assertion<B>>,
}

impl<A: Clone + 'static> ForAll<A, A> {
    /// Assertions see the generated value itself
    pub fn identity(name: impl Into<String>, generator: Generator<A>) -> Self {
        Self::new(name, generator, A::clone)
    }
}

impl<A: 'static, B: 'static> ForAll<A, B> {
    pub fn new<T>(name: impl Into<String>, generator: Generator<A>, transform: T) -> Self
    where
        T: Fn(&A) -> B + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            generator,
            transform: Arc::new(transform),
            assertions: Vec::new(),
        }
    }

    /// Append an assertion; assertions run in the order they were added
    pub fn assert<F>(mut self, check: F) -> Self
    where
        F: Fn(&B) -> Outcome + Send + Sync + 'static,
    {
        self.assertions.push(Arc::new(check));
        self
    }

    /// Append an already boxed assertion, such as a combinator result
    pub fn assertion(mut self, check: Assertion<B>) -> Self {
        self.assertions.push(check);
        self
    }

    pub fn build(self) -> Property<A> {
        let transform = self.transform;
        for_all(
            self.generator,
            self.name,
            move |value: &A| transform(value),
            self.assertions,
        )
    }
}
