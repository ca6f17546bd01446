//! Assertion functions and their lazy logical combinators.

use std::sync::Arc;

use crate::error::AssertionErrors;

/// What an assertion reports for one value
pub type Outcome = Result<(), AssertionErrors>;

/// A shareable check over the transformed value of a trial
pub type Assertion<B> = Arc<dyn Fn(&B) -> Outcome + Send + Sync>;

/// Box a closure as an [`Assertion`]
pub fn assertion<B, F>(f: F) -> Assertion<B>
where
    F: Fn(&B) -> Outcome + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `Ok(())` when `condition` holds, otherwise a single-message failure
pub fn ensure(condition: bool, message: impl Into<String>) -> Outcome {
    if condition {
        Ok(())
    } else {
        Err(AssertionErrors::single(message))
    }
}

/// Logical AND of `assertions`, evaluated in order until one fails
pub fn assertion_and<B: 'static>(assertions: Vec<Assertion<B>>) -> Assertion<B> {
    Arc::new(move |value: &B| {
        for check in &assertions {
            check(value)?;
        }
        Ok(())
    })
}

/// Logical OR of `assertions`, evaluated in order until one passes.
///
/// When none pass, the errors of every branch are returned in order.
pub fn assertion_or<B: 'static>(assertions: Vec<Assertion<B>>) -> Assertion<B> {
    Arc::new(move |value: &B| {
        let mut errors = AssertionErrors::new();
        for check in &assertions {
            match check(value) {
                Ok(()) => return Ok(()),
                Err(raised) => errors.merge(raised),
            }
        }
        Err(errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>, result: Outcome) -> Assertion<i32> {
        let counter = Arc::clone(counter);
        assertion(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            result.clone()
        })
    }

    #[test]
    fn test_ensure() {
        assert!(ensure(true, "unused").is_ok());
        let errors = ensure(false, "too large").unwrap_err();
        assert_eq!(errors.messages(), vec!["too large"]);
    }

    #[test]
    fn test_assertion_and_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let combined = assertion_and(vec![
            counting(&calls, Ok(())),
            counting(&calls, Err("second failed".into())),
            counting(&calls, Err("third failed".into())),
        ]);

        let errors = combined(&1).unwrap_err();
        assert_eq!(errors.messages(), vec!["second failed"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_assertion_and_all_pass() {
        let combined = assertion_and(vec![
            assertion(|x: &i32| ensure(*x > 0, "positive")),
            assertion(|x: &i32| ensure(*x < 10, "small")),
        ]);
        assert!(combined(&5).is_ok());
        assert!(combined(&50).unwrap_err().contains("small"));
        assert!(assertion_and::<i32>(Vec::new())(&0).is_ok());
    }

    #[test]
    fn test_assertion_or_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let combined = assertion_or(vec![
            counting(&calls, Err("first failed".into())),
            counting(&calls, Ok(())),
            counting(&calls, Err("never run".into())),
        ]);

        assert!(combined(&1).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_assertion_or_collects_every_error() {
        let combined = assertion_or(vec![
            assertion(|x: &i32| ensure(*x % 2 == 0, "not even")),
            assertion(|_: &i32| Err(AssertionErrors::new())),
            assertion(|x: &i32| ensure(*x > 100, "not large")),
        ]);

        let errors = combined(&7).unwrap_err();
        assert_eq!(errors.messages(), vec!["not even", "not large"]);
        assert!(assertion_or::<i32>(Vec::new())(&0).is_err());
    }

    #[test]
    fn test_nested_combinators() {
        let in_range = assertion_and(vec![
            assertion(|x: &i32| ensure(*x >= 0, "negative")),
            assertion(|x: &i32| ensure(*x < 100, "too large")),
        ]);
        let special = assertion(|x: &i32| ensure(*x == -1, "not the sentinel"));
        let combined = assertion_or(vec![in_range, special]);

        assert!(combined(&50).is_ok());
        assert!(combined(&-1).is_ok());
        let errors = combined(&500).unwrap_err();
        assert_eq!(errors.messages(), vec!["too large", "not the sentinel"]);
    }
}
