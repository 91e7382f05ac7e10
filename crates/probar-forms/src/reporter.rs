//! Reports for checklist runs.
//!
//! Every suite method returns a [`CheckReport`] holding the ordered outcomes
//! of one invocation. A [`SuiteReport`] collects several of them for a page
//! and renders a text summary, JSON or JUnit XML.

use crate::assertion::soft::{verify_outcomes, AssertionSummary, SoftAssertionError};
use crate::assertion::AssertionOutcome;
use crate::result::FormsResult;
use crate::suite::InputKind;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Outcomes of one checklist invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Unique id of this invocation
    pub run_id: Uuid,
    /// Field category checked
    pub kind: InputKind,
    /// Rendered selector of the element
    pub target: String,
    /// Outcomes in check order
    pub outcomes: Vec<AssertionOutcome>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl CheckReport {
    /// Whether every check passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// Failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&AssertionOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }

    /// Outcome recorded with `message`, if any
    #[must_use]
    pub fn outcome(&self, message: &str) -> Option<&AssertionOutcome> {
        self.outcomes.iter().find(|o| o.message == message)
    }

    /// Pass/fail counts
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        AssertionSummary::of(&self.outcomes)
    }

    /// Turn recorded failures into an error
    ///
    /// # Errors
    ///
    /// Returns [`SoftAssertionError`] listing every failed message.
    pub fn verify(&self) -> Result<(), SoftAssertionError> {
        verify_outcomes(&self.outcomes)
    }
}

/// Reports for several fields, usually one page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Report name
    pub name: String,
    /// Collected check reports
    pub checks: Vec<CheckReport>,
}

impl SuiteReport {
    /// Create an empty report
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
        }
    }

    /// Add a check report
    pub fn push(&mut self, report: CheckReport) {
        self.checks.push(report);
    }

    /// Combined counts across all checks
    #[must_use]
    pub fn summary(&self) -> AssertionSummary {
        let mut total = AssertionSummary::default();
        for check in &self.checks {
            total.merge(check.summary());
        }
        total
    }

    /// Whether every check passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(CheckReport::passed)
    }

    /// Total time spent in checks
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.checks.iter().map(|c| c.duration).sum()
    }

    /// Human-readable report listing failures under each field
    #[must_use]
    pub fn render_text(&self) -> String {
        let summary = self.summary();
        let mut out = format!(
            "{}: {}/{} assertions passed across {} field(s)\n",
            self.name,
            summary.passed,
            summary.total,
            self.checks.len()
        );
        for check in &self.checks {
            let status = if check.passed() { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "  [{status}] {} {} ({:.1}ms)",
                check.kind,
                check.target,
                check.duration.as_secs_f64() * 1000.0
            );
            for failure in check.failures() {
                let _ = writeln!(out, "      {failure}");
            }
        }
        out
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> FormsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty JSON to `path`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file writing fails
    pub fn write_json(&self, path: &Path) -> FormsResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Render JUnit XML, one testcase per check
    #[must_use]
    pub fn render_junit(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(
            xml,
            r#"<testsuite name="{}" tests="{}" failures="{}" time="{:.3}">"#,
            escape_xml(&self.name),
            self.checks.len(),
            self.checks.iter().filter(|c| !c.passed()).count(),
            self.total_duration().as_secs_f64()
        );
        for check in &self.checks {
            let _ = writeln!(
                xml,
                r#"  <testcase name="{} {}" time="{:.3}">"#,
                check.kind,
                escape_xml(&check.target),
                check.duration.as_secs_f64()
            );
            for failure in check.failures() {
                let text = escape_xml(&failure.to_string());
                let _ = writeln!(xml, r#"    <failure message="{text}">{text}</failure>"#);
            }
            xml.push_str("  </testcase>\n");
        }
        xml.push_str("</testsuite>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
