//! InputFieldSuite - one checklist per HTML input category.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  InputFieldSuite<'d, D: InputDriver>                             │
//! │                                                                  │
//! │  text_input(&FieldConfig) ──┐                                    │
//! │  number_input(.., &Number) ─┼──► CheckRun ──► Expectation ──┐    │
//! │  date_input(.., &Dates) ────┘    (one per call)             │    │
//! │                                       │                     ▼    │
//! │                                       │            SoftAssertions│
//! │                                       ▼                     │    │
//! │                                  CheckReport ◄──────────────┘    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is a fixed, ordered sequence of interactions, each followed
//! by a soft assertion. Mismatches are recorded and the sequence continues;
//! malformed caller constraints and driver failures return `Err`.

mod hidden;
mod media;
mod numeric;
mod temporal;
mod text;
mod toggle;

use crate::assertion::soft::SoftAssertions;
use crate::config::{FieldConfig, SuiteConfig};
use crate::driver::InputDriver;
use crate::expect::Expectation;
use crate::reporter::CheckReport;
use crate::result::{FormsError, FormsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

/// The sixteen HTML input categories with a checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    /// `type="text"`
    Text,
    /// `type="password"`
    Password,
    /// `type="email"`
    Email,
    /// `type="number"`
    Number,
    /// `type="tel"`
    Tel,
    /// `type="search"`
    Search,
    /// `type="date"`
    Date,
    /// `type="time"`
    Time,
    /// `type="datetime-local"`
    DatetimeLocal,
    /// `type="range"`
    Range,
    /// `type="checkbox"`
    Checkbox,
    /// `type="radio"`
    Radio,
    /// `type="file"`
    File,
    /// `type="color"`
    Color,
    /// `type="url"`
    Url,
    /// `type="hidden"`
    Hidden,
}

impl InputKind {
    /// Every category, in declaration order
    pub const ALL: [Self; 16] = [
        Self::Text,
        Self::Password,
        Self::Email,
        Self::Number,
        Self::Tel,
        Self::Search,
        Self::Date,
        Self::Time,
        Self::DatetimeLocal,
        Self::Range,
        Self::Checkbox,
        Self::Radio,
        Self::File,
        Self::Color,
        Self::Url,
        Self::Hidden,
    ];

    /// Value of the `type` attribute
    #[must_use]
    pub const fn type_attr(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Search => "search",
            Self::Date => "date",
            Self::Time => "time",
            Self::DatetimeLocal => "datetime-local",
            Self::Range => "range",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::File => "file",
            Self::Color => "color",
            Self::Url => "url",
            Self::Hidden => "hidden",
        }
    }

    /// Name used at the start of assertion messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Password => "Password",
            Self::Email => "Email",
            Self::Number => "Number",
            Self::Tel => "Telephone",
            Self::Search => "Search",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DatetimeLocal => "Datetime-local",
            Self::Range => "Range",
            Self::Checkbox => "Checkbox",
            Self::Radio => "Radio",
            Self::File => "File",
            Self::Color => "Color",
            Self::Url => "URL",
            Self::Hidden => "Hidden",
        }
    }

    /// Whether the checklist includes a clipboard paste
    #[must_use]
    pub const fn supports_paste(self) -> bool {
        !matches!(
            self,
            Self::Hidden | Self::Checkbox | Self::Radio | Self::Range | Self::File | Self::Color
        )
    }

    /// Free-text categories where `maxlength` truncates typed input
    #[must_use]
    pub const fn is_text_like(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Password | Self::Email | Self::Tel | Self::Search | Self::Url
        )
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_attr())
    }
}

/// Runs input-field checklists through an [`InputDriver`]
///
/// ```ignore
/// let suite = InputFieldSuite::new(&driver);
/// let report = suite
///     .number_input(
///         &FieldConfig::new("#qty"),
///         &NumberConstraints::new(Some(0.0), Some(10.0), Some("1")),
///     )
///     .await?;
/// report.verify()?;
/// ```
#[derive(Debug)]
pub struct InputFieldSuite<'d, D: InputDriver + ?Sized> {
    driver: &'d D,
    config: SuiteConfig,
}

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Create a suite with default settings
    #[must_use]
    pub fn new(driver: &'d D) -> Self {
        Self {
            driver,
            config: SuiteConfig::default(),
        }
    }

    /// Replace the suite settings
    #[must_use]
    pub fn with_config(mut self, config: SuiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Current settings
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    fn begin<'s>(&'s self, kind: InputKind, field: &'s FieldConfig) -> CheckRun<'s, D> {
        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, %kind, element = %field.input, "checking input field");
        CheckRun {
            driver: self.driver,
            config: &self.config,
            field,
            kind,
            soft: SoftAssertions::with_mode(self.config.assertion_mode),
            run_id,
            started: Instant::now(),
        }
    }
}

/// State of one checklist invocation
struct CheckRun<'s, D: InputDriver + ?Sized> {
    driver: &'s D,
    config: &'s SuiteConfig,
    field: &'s FieldConfig,
    kind: InputKind,
    soft: SoftAssertions,
    run_id: Uuid,
    started: Instant,
}

impl<'s, D: InputDriver + ?Sized> CheckRun<'s, D> {
    fn label(&self) -> &'static str {
        self.kind.label()
    }

    fn expect(&mut self, message: impl Into<String>) -> Expectation<'_, D> {
        Expectation::new(self.driver, &self.field.input, &mut self.soft, message)
    }

    /// `value` as a field honouring `maxlength` would hold it
    fn within_max_length(&self, value: &str) -> String {
        match self.field.max_length {
            Some(max) if self.kind.is_text_like() => value.chars().take(max).collect(),
            _ => value.to_string(),
        }
    }

    async fn fill(&self, value: &str) -> FormsResult<()> {
        tracing::debug!(element = %self.field.input, value, "fill");
        self.driver.fill(&self.field.input, value).await
    }

    async fn press(&self, key: &str) -> FormsResult<()> {
        tracing::debug!(element = %self.field.input, key, "press");
        self.driver.press(&self.field.input, key).await
    }

    async fn visible(&mut self) -> FormsResult<()> {
        let message = format!("{} input should be visible.", self.label());
        self.expect(message).to_be_visible().await
    }

    async fn type_attribute(&mut self) -> FormsResult<()> {
        let type_attr = self.kind.type_attr();
        let message = format!("{} input should have type '{type_attr}'.", self.label());
        self.expect(message)
            .to_have_attribute("type", type_attr)
            .await
    }

    async fn attribute(&mut self, name: &str, expected: &str) -> FormsResult<()> {
        let message = format!(
            "{} input should have {name} '{expected}'.",
            self.label()
        );
        self.expect(message).to_have_attribute(name, expected).await
    }

    /// Fill `value` and expect it back (truncated to `maxlength` for free text)
    async fn accepts(&mut self, value: &str, message: impl Into<String>) -> FormsResult<()> {
        let expected = self.within_max_length(value);
        self.fill_expecting(value, &expected, message).await
    }

    async fn fill_expecting(
        &mut self,
        value: &str,
        expected: &str,
        message: impl Into<String>,
    ) -> FormsResult<()> {
        self.fill(value).await?;
        self.expect(message).to_have_value(expected).await
    }

    /// Fill `value` and expect the field not to hold it
    async fn rejects(&mut self, value: &str, message: impl Into<String>) -> FormsResult<()> {
        self.fill(value).await?;
        self.expect(message).not().to_have_value(value).await
    }

    async fn max_length_check(&mut self, value: &str) -> FormsResult<()> {
        let message = format!(
            "{} input should not accept more than the maximum length.",
            self.label()
        );
        self.rejects(value, message).await
    }

    async fn placeholder_check(&mut self, expected: &str) -> FormsResult<()> {
        self.expect(format!("Placeholder should be '{expected}'."))
            .to_have_attribute("placeholder", expected)
            .await
    }

    async fn disabled_check(&mut self) -> FormsResult<()> {
        self.expect("Disabled input should not be editable.")
            .to_be_disabled()
            .await
    }

    async fn read_only_check(&mut self) -> FormsResult<()> {
        let config = self.config;
        let sentinel = config.read_only_sentinel.as_str();
        match self.driver.fill(&self.field.input, sentinel).await {
            Ok(()) => {}
            Err(FormsError::NotFillable { input_type, .. }) => {
                tracing::debug!(element = %self.field.input, %input_type, "fill refused");
            }
            Err(e) => return Err(e),
        }
        self.expect("Read-only input should not allow typing.")
            .not()
            .to_have_value(sentinel)
            .await
    }

    /// Placeholder, disabled and read-only checks for the options that are set
    async fn field_state_checks(&mut self) -> FormsResult<()> {
        let field = self.field;
        if let Some(placeholder) = &field.placeholder {
            self.placeholder_check(placeholder).await?;
        }
        if field.disabled {
            self.disabled_check().await?;
        }
        if field.read_only {
            self.read_only_check().await?;
        }
        Ok(())
    }

    /// Clear, put `text` on the clipboard, focus and paste
    async fn paste_check(&mut self, text: &str, expected: &str) -> FormsResult<()> {
        let config = self.config;
        self.fill("").await?;
        self.driver.write_clipboard(text).await?;
        self.driver.focus(&self.field.input).await?;
        tracing::debug!(element = %self.field.input, shortcut = %config.paste_shortcut, "paste");
        self.driver.keyboard_press(&config.paste_shortcut).await?;
        let message = format!("{} input should allow pasting.", self.label());
        self.expect(message).to_have_value(expected).await
    }

    fn finish(self) -> CheckReport {
        let duration = self.started.elapsed();
        let summary = self.soft.summary();
        tracing::info!(
            run_id = %self.run_id,
            kind = %self.kind,
            element = %self.field.input,
            passed = summary.passed,
            failed = summary.failed,
            "input field checks complete"
        );
        CheckReport {
            run_id: self.run_id,
            kind: self.kind,
            target: self.field.input.to_string(),
            outcomes: self.soft.into_outcomes(),
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_attrs_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in InputKind::ALL {
            assert!(seen.insert(kind.type_attr()));
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_paste_categories() {
        let no_paste: Vec<_> = InputKind::ALL
            .into_iter()
            .filter(|k| !k.supports_paste())
            .collect();
        assert_eq!(
            no_paste,
            vec![
                InputKind::Range,
                InputKind::Checkbox,
                InputKind::Radio,
                InputKind::File,
                InputKind::Color,
                InputKind::Hidden,
            ]
        );
    }

    #[test]
    fn test_serde_uses_type_attr() {
        for kind in InputKind::ALL {
            let json = serde_json::to_string(&kind).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", kind.type_attr()));
        }
    }

    #[test]
    fn test_text_like() {
        assert!(InputKind::Tel.is_text_like());
        assert!(!InputKind::Number.is_text_like());
        assert!(!InputKind::Date.is_text_like());
    }
}
