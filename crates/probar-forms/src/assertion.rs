//! Assertion outcome records.
//!
//! Every soft check appends one [`AssertionOutcome`]; the collector lives in
//! [`soft`].

pub mod soft;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Result of a single soft assertion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionOutcome {
    /// Position of this assertion in the routine's sequence
    pub index: usize,
    /// Whether the assertion passed
    pub passed: bool,
    /// Human-readable message describing the expectation
    pub message: String,
    /// Expected/received detail for failures
    pub detail: Option<String>,
    /// When the outcome was recorded
    #[serde(skip)]
    pub timestamp: Option<Instant>,
}

impl AssertionOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn pass(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            passed: true,
            message: message.into(),
            detail: None,
            timestamp: Some(Instant::now()),
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn fail(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            passed: false,
            message: message.into(),
            detail: None,
            timestamp: Some(Instant::now()),
        }
    }

    /// Attach expected/received detail
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for AssertionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { "PASS" } else { "FAIL" };
        write!(f, "[{mark}] {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_has_no_detail() {
        let outcome = AssertionOutcome::pass(0, "visible");
        assert!(outcome.passed);
        assert!(outcome.detail.is_none());
        assert_eq!(outcome.to_string(), "[PASS] visible");
    }

    #[test]
    fn test_fail_display_includes_detail() {
        let outcome = AssertionOutcome::fail(3, "should have value")
            .with_detail("expected \"a\", received \"b\"");
        assert_eq!(outcome.index, 3);
        assert_eq!(
            outcome.to_string(),
            "[FAIL] should have value (expected \"a\", received \"b\")"
        );
    }

    #[test]
    fn test_serializes_without_timestamp() {
        let outcome = AssertionOutcome::pass(1, "ok");
        let json = serde_json::to_string(&outcome).unwrap_or_default();
        assert!(json.contains("\"passed\":true"));
        assert!(!json.contains("timestamp"));
    }
}
