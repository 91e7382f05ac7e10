//! Soft Assertions
//!
//! Record every assertion outcome without stopping the check routine.
//!
//! ## Toyota Way Application:
//! - **Jidoka**: Surface every defect on a field in one pass
//! - **Poka-Yoke**: Outcomes are indexed in the order they were checked

use super::AssertionOutcome;
use crate::result::{FormsError, FormsResult};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Mode for soft assertions behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssertionMode {
    /// Record all outcomes (default)
    #[default]
    Collect,
    /// Stop on first failure (like hard assertions)
    FailFast,
}

/// Soft assertions collector
///
/// Records both passes and failures. In [`AssertionMode::Collect`] a failure
/// never returns `Err`; in [`AssertionMode::FailFast`] the first failure is
/// recorded and then returned as [`FormsError::AssertionFailed`].
///
/// ## Example
///
/// ```
/// use probar_forms::SoftAssertions;
///
/// let mut soft = SoftAssertions::new();
/// soft.assert_eq(&1, &2, "values should match").unwrap();
/// soft.assert_true(true, "condition should be true").unwrap();
/// assert_eq!(soft.failure_count(), 1);
/// assert_eq!(soft.assertion_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SoftAssertions {
    outcomes: Vec<AssertionOutcome>,
    mode: AssertionMode,
}

impl SoftAssertions {
    /// Create a new soft assertions collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific mode
    #[must_use]
    pub fn with_mode(mode: AssertionMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> AssertionMode {
        self.mode
    }

    /// Record an outcome
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::AssertionFailed`] only in fail-fast mode when
    /// `passed` is false.
    pub fn record(
        &mut self,
        passed: bool,
        message: impl Into<String>,
        detail: Option<String>,
    ) -> FormsResult<()> {
        let index = self.outcomes.len();
        let mut outcome = if passed {
            AssertionOutcome::pass(index, message)
        } else {
            AssertionOutcome::fail(index, message)
        };
        outcome.detail = detail;

        if passed {
            tracing::debug!(index, message = %outcome.message, "assertion passed");
        } else {
            tracing::warn!(
                index,
                message = %outcome.message,
                detail = outcome.detail.as_deref().unwrap_or(""),
                "assertion failed"
            );
        }

        let fail_fast = !passed && self.mode == AssertionMode::FailFast;
        let text = outcome.to_string();
        self.outcomes.push(outcome);

        if fail_fast {
            return Err(FormsError::AssertionFailed { message: text });
        }
        Ok(())
    }

    /// Assert two values are equal
    ///
    /// # Errors
    ///
    /// See [`SoftAssertions::record`].
    pub fn assert_eq<T: PartialEq + Debug>(
        &mut self,
        actual: &T,
        expected: &T,
        message: &str,
    ) -> FormsResult<()> {
        let detail = (actual != expected).then(|| format!("expected {expected:?}, got {actual:?}"));
        self.record(actual == expected, message, detail)
    }

    /// Assert two values are not equal
    ///
    /// # Errors
    ///
    /// See [`SoftAssertions::record`].
    pub fn assert_ne<T: PartialEq + Debug>(
        &mut self,
        actual: &T,
        unexpected: &T,
        message: &str,
    ) -> FormsResult<()> {
        let detail =
            (actual == unexpected).then(|| format!("expected values to differ, both were {actual:?}"));
        self.record(actual != unexpected, message, detail)
    }

    /// Assert a condition is true
    ///
    /// # Errors
    ///
    /// See [`SoftAssertions::record`].
    pub fn assert_true(&mut self, condition: bool, message: &str) -> FormsResult<()> {
        let detail = (!condition).then(|| "expected true, got false".to_string());
        self.record(condition, message, detail)
    }

    /// Assert a condition is false
    ///
    /// # Errors
    ///
    /// See [`SoftAssertions::record`].
    pub fn assert_false(&mut self, condition: bool, message: &str) -> FormsResult<()> {
        let detail = condition.then(|| "expected false, got true".to_string());
        self.record(!condition, message, detail)
    }

    /// All recorded outcomes, in order
    #[must_use]
    pub fn outcomes(&self) -> &[AssertionOutcome] {
        &self.outcomes
    }

    /// Failed outcomes only
    pub fn failures(&self) -> impl Iterator<Item = &AssertionOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Get the number of failures
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Get the total number of assertions checked
    #[must_use]
    pub fn assertion_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Verify all assertions passed, returning error if any failed
    ///
    /// # Errors
    ///
    /// Returns error containing all failure messages if any assertions failed
    pub fn verify(&self) -> Result<(), SoftAssertionError> {
        verify_outcomes(&self.outcomes)
    }

    /// Get a summary of the assertions
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        AssertionSummary::of(&self.outcomes)
    }

    /// Consume the collector, yielding its outcomes
    #[must_use]
    pub fn into_outcomes(self) -> Vec<AssertionOutcome> {
        self.outcomes
    }
}

/// Summary of assertion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssertionSummary {
    /// Total assertions checked
    pub total: usize,
    /// Assertions that passed
    pub passed: usize,
    /// Assertions that failed
    pub failed: usize,
}

impl AssertionSummary {
    /// Summarize a slice of outcomes
    #[must_use]
    pub fn of(outcomes: &[AssertionOutcome]) -> Self {
        let failed = outcomes.iter().filter(|o| !o.passed).count();
        Self {
            total: outcomes.len(),
            passed: outcomes.len() - failed,
            failed,
        }
    }

    /// Add another summary into this one
    pub fn merge(&mut self, other: Self) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
    }
}

/// Turn recorded failures into an error listing each message
pub(crate) fn verify_outcomes(outcomes: &[AssertionOutcome]) -> Result<(), SoftAssertionError> {
    let failures: Vec<&AssertionOutcome> = outcomes.iter().filter(|o| !o.passed).collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(SoftAssertionError::new(&failures))
    }
}

/// Error type for soft assertion failures
#[derive(Debug, Clone)]
pub struct SoftAssertionError {
    /// All failure messages
    pub failures: Vec<String>,
    /// Number of failed assertions
    pub count: usize,
}

impl SoftAssertionError {
    /// Create a new error from failures
    #[must_use]
    pub fn new(failures: &[&AssertionOutcome]) -> Self {
        Self {
            failures: failures
                .iter()
                .map(|f| match &f.detail {
                    Some(detail) => format!("{} ({detail})", f.message),
                    None => f.message.clone(),
                })
                .collect(),
            count: failures.len(),
        }
    }
}

impl std::fmt::Display for SoftAssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} assertion(s) failed:", self.count)?;
        for (i, failure) in self.failures.iter().enumerate() {
            writeln!(f, "  {}. {failure}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for SoftAssertionError {}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod soft_assertions_basic {
        use super::*;

        #[test]
        fn test_new_creates_empty() {
            let soft = SoftAssertions::new();
            assert!(soft.all_passed());
            assert_eq!(soft.failure_count(), 0);
            assert_eq!(soft.assertion_count(), 0);
        }

        #[test]
        fn test_with_mode() {
            let soft = SoftAssertions::with_mode(AssertionMode::FailFast);
            assert_eq!(soft.mode(), AssertionMode::FailFast);
        }

        #[test]
        fn test_passes_are_recorded() {
            let mut soft = SoftAssertions::new();
            soft.assert_true(true, "ok").unwrap();
            assert_eq!(soft.assertion_count(), 1);
            assert!(soft.outcomes()[0].passed);
            assert_eq!(soft.outcomes()[0].message, "ok");
        }
    }

    mod equality_assertions {
        use super::*;

        #[test]
        fn test_assert_eq_fail_keeps_going() {
            let mut soft = SoftAssertions::new();
            soft.assert_eq(&1, &2, "values should match").unwrap();
            soft.assert_eq(&3, &3, "values should match").unwrap();
            assert_eq!(soft.failure_count(), 1);
            assert_eq!(soft.assertion_count(), 2);
            let detail = soft.outcomes()[0].detail.clone().unwrap();
            assert!(detail.contains("expected 2, got 1"));
        }

        #[test]
        fn test_assert_ne() {
            let mut soft = SoftAssertions::new();
            soft.assert_ne(&"a", &"b", "should differ").unwrap();
            soft.assert_ne(&"a", &"a", "should differ").unwrap();
            assert_eq!(soft.failure_count(), 1);
        }

        #[test]
        fn test_assert_false() {
            let mut soft = SoftAssertions::new();
            soft.assert_false(true, "should be false").unwrap();
            assert!(!soft.all_passed());
        }
    }

    mod fail_fast {
        use super::*;

        #[test]
        fn test_fail_fast_returns_error_after_recording() {
            let mut soft = SoftAssertions::with_mode(AssertionMode::FailFast);
            soft.assert_true(true, "first").unwrap();
            let err = soft.assert_true(false, "second").unwrap_err();
            assert!(matches!(err, FormsError::AssertionFailed { .. }));
            assert!(err.to_string().contains("second"));
            assert_eq!(soft.assertion_count(), 2);
        }
    }

    mod verify {
        use super::*;

        #[test]
        fn test_verify_pass() {
            let mut soft = SoftAssertions::new();
            soft.assert_eq(&1, &1, "match").unwrap();
            assert!(soft.verify().is_ok());
        }

        #[test]
        fn test_error_display() {
            let mut soft = SoftAssertions::new();
            soft.assert_eq(&1, &2, "first").unwrap();
            soft.assert_true(false, "second").unwrap();
            let err = soft.verify().unwrap_err();
            let display = format!("{err}");
            assert!(display.contains("2 assertion(s) failed"));
            assert!(display.contains("1. first (expected 2, got 1)"));
            assert!(display.contains("second"));
        }
    }

    mod summary {
        use super::*;

        #[test]
        fn test_summary() {
            let mut soft = SoftAssertions::new();
            soft.assert_eq(&1, &1, "pass").unwrap();
            soft.assert_eq(&1, &2, "fail").unwrap();
            soft.assert_true(true, "pass").unwrap();

            let summary = soft.summary();
            assert_eq!(summary.total, 3);
            assert_eq!(summary.passed, 2);
            assert_eq!(summary.failed, 1);
        }

        #[test]
        fn test_merge() {
            let mut a = AssertionSummary {
                total: 2,
                passed: 1,
                failed: 1,
            };
            a.merge(AssertionSummary {
                total: 3,
                passed: 3,
                failed: 0,
            });
            assert_eq!(a.total, 5);
            assert_eq!(a.passed, 4);
            assert_eq!(a.failed, 1);
        }
    }
}
