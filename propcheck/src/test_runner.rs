//! Integration with the Rust test harness.
//!
//! [`expect_success`] and [`expect_failure`] panic, failing the surrounding
//! `#[test]`, when a [`RunResult`] is not the expected variant. The panic
//! message carries the full falsification report.

use std::fmt;

use crate::property::{Falsified, RunResult};

/// Formatting helpers for property results
pub struct TestRunner;

impl TestRunner {
    /// Format either variant of a result for test output
    pub fn format_result<A: fmt::Debug>(result: &RunResult<A>) -> String {
        match result {
            RunResult::Passed => "Property PASSED".to_string(),
            RunResult::Falsified(falsified) => Self::format_falsified(falsified),
        }
    }

    /// Multi-line report of a falsified property
    pub fn format_falsified<A: fmt::Debug>(falsified: &Falsified<A>) -> String {
        let mut report = String::new();

        report.push_str(&format!("Property FALSIFIED: {}\n", falsified.name));
        report.push_str(&format!("Failing case: {:?}\n", falsified.failed_case));
        report.push_str(&format!(
            "Successes before failure: {}\n",
            falsified.successes
        ));
        match &falsified.last_success_case {
            Some(case) => report.push_str(&format!("Last success: {:?}\n", case)),
            None => report.push_str("Last success: none\n"),
        }
        report.push_str(&format!("Errors: {}", falsified.errors));

        report
    }

    /// Message used when a result does not match the expectation
    pub fn mismatch_message<A: fmt::Debug>(expected: &str, result: &RunResult<A>) -> String {
        format!(
            "Expected property to be {} but it was:\n{}",
            expected,
            Self::format_result(result)
        )
    }
}

/// Fail the current test unless `result` is [`RunResult::Passed`]
#[track_caller]
pub fn expect_success<A: fmt::Debug>(result: &RunResult<A>) {
    if result.is_falsified() {
        panic!("{}", TestRunner::mismatch_message("Passed", result));
    }
}

/// Fail the current test unless `result` is falsified; returns the payload
#[track_caller]
pub fn expect_failure<A: fmt::Debug>(result: &RunResult<A>) -> &Falsified<A> {
    match result {
        RunResult::Falsified(falsified) => falsified,
        RunResult::Passed => panic!("{}", TestRunner::mismatch_message("Falsified", result)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssertionErrors;

    fn sample() -> RunResult<Vec<i32>> {
        let mut errors = AssertionErrors::single("too short");
        errors.merge("not sorted".into());
        RunResult::Falsified(Falsified {
            name: "sorted and long".to_string(),
            failed_case: vec![3, 1],
            successes: 4,
            last_success_case: Some(vec![1, 2, 3]),
            errors,
        })
    }

    #[test]
    fn test_format_falsified() {
        let report = TestRunner::format_result(&sample());
        assert!(report.contains("Property FALSIFIED: sorted and long"));
        assert!(report.contains("Failing case: [3, 1]"));
        assert!(report.contains("Successes before failure: 4"));
        assert!(report.contains("Last success: [1, 2, 3]"));
        assert!(report.contains("2 errors occurred"));
        assert!(report.contains("* not sorted"));
    }

    #[test]
    fn test_format_passed() {
        assert_eq!(
            TestRunner::format_result(&RunResult::<i32>::Passed),
            "Property PASSED"
        );
    }

    #[test]
    fn test_expect_success_accepts_passed() {
        expect_success(&RunResult::<i32>::Passed);
    }

    #[test]
    #[should_panic(expected = "Expected property to be Passed")]
    fn test_expect_success_rejects_falsified() {
        expect_success(&sample());
    }

    #[test]
    fn test_expect_failure_returns_payload() {
        let result = sample();
        let falsified = expect_failure(&result);
        assert_eq!(falsified.successes, 4);
    }

    #[test]
    #[should_panic(expected = "Expected property to be Falsified but it was:\nProperty PASSED")]
    fn test_expect_failure_rejects_passed() {
        expect_failure(&RunResult::<i32>::Passed);
    }
}
