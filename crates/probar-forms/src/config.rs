//! Per-call field configuration and suite-wide settings.

use crate::assertion::soft::AssertionMode;
use crate::driver::keys;
use crate::fixture::FixtureFiles;
use crate::locator::Locator;
use crate::result::{FormsError, FormsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The common options every check routine accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    /// Element under test
    pub input: Locator,
    /// Expected placeholder attribute
    pub placeholder: Option<String>,
    /// Assert the element is disabled
    pub disabled: bool,
    /// Assert typed input is rejected
    pub read_only: bool,
    /// Assert input longer than this is rejected or truncated
    pub max_length: Option<usize>,
    /// (password) assert `autocomplete` is not `on`
    pub auto_complete_off: bool,
}

impl FieldConfig {
    /// Configuration with no optional checks
    #[must_use]
    pub fn new(input: impl Into<Locator>) -> Self {
        Self {
            input: input.into(),
            placeholder: None,
            disabled: false,
            read_only: false,
            max_length: None,
            auto_complete_off: false,
        }
    }

    /// Expect a placeholder
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Expect the field to be disabled
    #[must_use]
    pub const fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Expect the field to be read-only
    #[must_use]
    pub const fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Expect a maximum length
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Expect `autocomplete` to be switched off
    #[must_use]
    pub const fn with_auto_complete_off(mut self, off: bool) -> Self {
        self.auto_complete_off = off;
        self
    }
}

/// Constraints for `number` inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberConstraints {
    /// Lower bound the field clamps to
    pub min: Option<f64>,
    /// Upper bound the field clamps to
    pub max: Option<f64>,
    /// Step attribute as written in the markup (e.g. `"1"`, `"0.01"`, `"any"`)
    pub step: Option<String>,
}

impl NumberConstraints {
    /// Bounds and step in one go
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>, step: Option<&str>) -> Self {
        Self {
            min,
            max,
            step: step.map(str::to_string),
        }
    }

    /// Whether the step admits fractional values
    #[must_use]
    pub fn allows_decimals(&self) -> bool {
        self.step
            .as_deref()
            .is_some_and(|s| s.contains('.') || s.eq_ignore_ascii_case("any"))
    }

    /// Numeric step used for arrow-key checks
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidConstraint`] when the step is neither a
    /// positive number nor `any`.
    pub fn step_value(&self) -> FormsResult<Option<f64>> {
        match self.step.as_deref() {
            None => Ok(None),
            Some(s) if s.eq_ignore_ascii_case("any") => Ok(Some(1.0)),
            Some(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .map(Some)
                .ok_or_else(|| {
                    FormsError::constraint("step", format!("'{s}' is not a positive number"))
                }),
        }
    }

    /// Value a conforming field shows after `typed` is entered
    ///
    /// Decimals follow `rule` unless the step allows them, then the result
    /// is clamped to `min`/`max`. Non-numeric input yields an empty value.
    #[must_use]
    pub fn expected_value(&self, typed: &str, rule: DecimalRule) -> String {
        let Ok(parsed) = typed.trim().parse::<f64>() else {
            return String::new();
        };
        let shaped = if self.allows_decimals() {
            typed.to_string()
        } else {
            rule.expected(typed)
        };
        let value = shaped.parse::<f64>().unwrap_or(parsed);
        match (self.min, self.max) {
            (Some(min), _) if value < min => format_number(min),
            (_, Some(max)) if value > max => format_number(max),
            _ => shaped,
        }
    }
}

/// Constraints for `tel` inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelConstraints {
    /// Regular expression the field enforces
    pub pattern: Option<String>,
}

/// Bounds for `date` inputs (`YYYY-MM-DD`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBounds {
    /// Earliest accepted date
    pub min: Option<String>,
    /// Latest accepted date
    pub max: Option<String>,
}

/// Bounds for `time` inputs (`HH:mm`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeBounds {
    /// Earliest accepted time
    pub min_time: Option<String>,
    /// Latest accepted time
    pub max_time: Option<String>,
}

/// Bounds for `datetime-local` inputs (`YYYY-MM-DDTHH:mm`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeBounds {
    /// Earliest accepted date-time
    pub min: Option<String>,
    /// Latest accepted date-time
    pub max: Option<String>,
}

/// Constraints for `range` inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeConstraints {
    /// `min` attribute
    pub min: Option<f64>,
    /// `max` attribute
    pub max: Option<f64>,
    /// `step` attribute
    pub step: Option<f64>,
}

impl RangeConstraints {
    /// Check that the bounds and step describe a usable slider
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidConstraint`] for a non-finite bound, a
    /// step that is not a positive number, or `min > max`.
    pub fn validate(&self) -> FormsResult<()> {
        for (name, bound) in [("min", self.min), ("max", self.max)] {
            if bound.is_some_and(|v| !v.is_finite()) {
                return Err(FormsError::constraint(name, "must be a finite number"));
            }
        }
        if let Some(step) = self.step {
            if !(step.is_finite() && step > 0.0) {
                return Err(FormsError::constraint(
                    "step",
                    format!("'{step}' is not a positive number"),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(FormsError::constraint(
                    "min",
                    format!("{} is greater than max {}", format_number(min), format_number(max)),
                ));
            }
        }
        Ok(())
    }
}

/// Options for `checkbox` and `radio` inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleOptions {
    /// Expected initial checked state (default: unchecked)
    pub checked: Option<bool>,
    /// Radio group name
    pub name: Option<String>,
}

/// Options for `file` inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    /// Expected `accept` attribute
    pub accept: Option<String>,
    /// Whether multiple selection is enabled
    pub multiple: bool,
}

/// Options for `color` inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorOptions {
    /// Expected initial value
    pub default_value: Option<String>,
}

/// How a number field without fractional step treats a decimal
///
/// Rendering engines differ here, so the expected value is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecimalRule {
    /// Drop the fractional part
    #[default]
    Truncate,
    /// Round half away from zero
    Round,
    /// Keep the typed decimal verbatim
    Keep,
}

impl DecimalRule {
    /// Expected field value after typing `typed`
    #[must_use]
    pub fn expected(self, typed: &str) -> String {
        let Ok(value) = typed.parse::<f64>() else {
            return typed.to_string();
        };
        match self {
            Self::Truncate => format_number(value.trunc()),
            Self::Round => format_number(value.round()),
            Self::Keep => typed.to_string(),
        }
    }
}

/// Render a number the way a form field displays it (`11`, not `11.0`)
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{value}")
}

/// Suite-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Key combo used to paste
    pub paste_shortcut: String,
    /// Expected decimal handling when the step is integral
    pub decimal_rule: DecimalRule,
    /// Date bound used when the caller gives none
    pub default_date_min: String,
    /// Date bound used when the caller gives none
    pub default_date_max: String,
    /// Text the read-only check tries to type
    pub read_only_sentinel: String,
    /// Collect every outcome or stop at the first failure
    pub assertion_mode: AssertionMode,
    /// Sample files for the file-input checks
    pub fixtures: FixtureFiles,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            paste_shortcut: keys::platform_paste().to_string(),
            decimal_rule: DecimalRule::default(),
            default_date_min: "2020-01-01".to_string(),
            default_date_max: "2025-12-31".to_string(),
            read_only_sentinel: "Read Only Test".to_string(),
            assertion_mode: AssertionMode::default(),
            fixtures: FixtureFiles::default(),
        }
    }
}

impl SuiteConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from YAML; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::Yaml`] for malformed YAML and
    /// [`FormsError::Config`] for invalid date bounds.
    pub fn from_yaml_str(yaml: &str) -> FormsResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file, then apply the fixture-directory environment override
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or see
    /// [`SuiteConfig::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> FormsResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_yaml_str(&text)?;
        config.fixtures = config.fixtures.with_env_override();
        Ok(config)
    }

    /// Check that the default date bounds parse
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::Config`] naming the offending field.
    pub fn validate(&self) -> FormsResult<()> {
        for (field, value) in [
            ("default_date_min", &self.default_date_min),
            ("default_date_max", &self.default_date_max),
        ] {
            crate::temporal::validate_date(value).map_err(|e| FormsError::Config {
                message: format!("{field}: {e}"),
            })?;
        }
        Ok(())
    }

    /// Set the paste shortcut
    #[must_use]
    pub fn with_paste_shortcut(mut self, combo: impl Into<String>) -> Self {
        self.paste_shortcut = combo.into();
        self
    }

    /// Set the decimal rule
    #[must_use]
    pub const fn with_decimal_rule(mut self, rule: DecimalRule) -> Self {
        self.decimal_rule = rule;
        self
    }

    /// Set the default date bounds
    #[must_use]
    pub fn with_default_date_bounds(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.default_date_min = min.into();
        self.default_date_max = max.into();
        self
    }

    /// Set the read-only sentinel
    #[must_use]
    pub fn with_read_only_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.read_only_sentinel = sentinel.into();
        self
    }

    /// Set the assertion mode
    #[must_use]
    pub const fn with_assertion_mode(mut self, mode: AssertionMode) -> Self {
        self.assertion_mode = mode;
        self
    }

    /// Set the fixture files
    #[must_use]
    pub fn with_fixtures(mut self, fixtures: FixtureFiles) -> Self {
        self.fixtures = fixtures;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod field_config_tests {
        use super::*;

        #[test]
        fn test_defaults_are_off() {
            let field = FieldConfig::new("#name");
            assert!(field.placeholder.is_none());
            assert!(!field.disabled);
            assert!(!field.read_only);
            assert!(field.max_length.is_none());
        }

        #[test]
        fn test_builder() {
            let field = FieldConfig::new("#name")
                .with_placeholder("Your name")
                .with_disabled(true)
                .with_read_only(true)
                .with_max_length(5);
            assert_eq!(field.placeholder.as_deref(), Some("Your name"));
            assert!(field.disabled);
            assert!(field.read_only);
            assert_eq!(field.max_length, Some(5));
        }
    }

    mod number_constraint_tests {
        use super::*;

        #[test]
        fn test_allows_decimals() {
            assert!(NumberConstraints::new(None, None, Some("0.01")).allows_decimals());
            assert!(NumberConstraints::new(None, None, Some("any")).allows_decimals());
            assert!(!NumberConstraints::new(None, None, Some("1")).allows_decimals());
            assert!(!NumberConstraints::default().allows_decimals());
        }

        #[test]
        fn test_step_value() {
            assert_eq!(NumberConstraints::default().step_value().unwrap(), None);
            assert_eq!(
                NumberConstraints::new(None, None, Some("2.5"))
                    .step_value()
                    .unwrap(),
                Some(2.5)
            );
            assert!(NumberConstraints::new(None, None, Some("abc"))
                .step_value()
                .is_err());
            assert!(NumberConstraints::new(None, None, Some("-1"))
                .step_value()
                .is_err());
        }

        #[test]
        fn test_expected_value() {
            let bounded = NumberConstraints::new(Some(0.0), Some(10.0), Some("1"));
            assert_eq!(bounded.expected_value("-1", DecimalRule::Truncate), "0");
            assert_eq!(bounded.expected_value("11", DecimalRule::Truncate), "10");
            assert_eq!(bounded.expected_value("5", DecimalRule::Truncate), "5");
            assert_eq!(bounded.expected_value("abc", DecimalRule::Truncate), "");

            let open = NumberConstraints::default();
            assert_eq!(open.expected_value("123.45", DecimalRule::Truncate), "123");
            assert_eq!(open.expected_value("123.45", DecimalRule::Keep), "123.45");
            assert_eq!(open.expected_value("-50", DecimalRule::Round), "-50");

            let fractional = NumberConstraints::new(None, None, Some("0.01"));
            assert_eq!(fractional.expected_value("123.45", DecimalRule::Truncate), "123.45");
        }
    }

    mod range_constraint_tests {
        use super::*;

        fn range(min: Option<f64>, max: Option<f64>, step: Option<f64>) -> RangeConstraints {
            RangeConstraints { min, max, step }
        }

        #[test]
        fn test_valid_ranges() {
            assert!(RangeConstraints::default().validate().is_ok());
            assert!(range(Some(0.0), Some(100.0), Some(5.0)).validate().is_ok());
            assert!(range(Some(3.0), Some(3.0), Some(0.5)).validate().is_ok());
        }

        #[test]
        fn test_bad_steps() {
            for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
                let err = range(Some(0.0), Some(10.0), Some(step)).validate().unwrap_err();
                assert!(
                    matches!(err, FormsError::InvalidConstraint { ref name, .. } if name == "step"),
                    "step {step} accepted"
                );
            }
        }

        #[test]
        fn test_inverted_bounds() {
            let err = range(Some(10.0), Some(0.0), None).validate().unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid constraint 'min': 10 is greater than max 0"
            );
        }

        #[test]
        fn test_non_finite_bound() {
            assert!(range(Some(f64::NAN), None, None).validate().is_err());
            assert!(range(None, Some(f64::INFINITY), None).validate().is_err());
        }
    }

    mod decimal_rule_tests {
        use super::*;

        #[test]
        fn test_truncate() {
            assert_eq!(DecimalRule::Truncate.expected("123.45"), "123");
            assert_eq!(DecimalRule::Truncate.expected("123.99"), "123");
        }

        #[test]
        fn test_round() {
            assert_eq!(DecimalRule::Round.expected("123.45"), "123");
            assert_eq!(DecimalRule::Round.expected("123.5"), "124");
        }

        #[test]
        fn test_keep() {
            assert_eq!(DecimalRule::Keep.expected("123.45"), "123.45");
        }

        #[test]
        fn test_format_number() {
            assert_eq!(format_number(11.0), "11");
            assert_eq!(format_number(10.5), "10.5");
            assert_eq!(format_number(-0.0), "0");
            assert_eq!(format_number(-1.0), "-1");
        }
    }

    mod suite_config_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = SuiteConfig::default();
            assert_eq!(config.paste_shortcut, keys::platform_paste());
            assert_eq!(config.decimal_rule, DecimalRule::Truncate);
            assert_eq!(config.default_date_min, "2020-01-01");
            assert_eq!(config.default_date_max, "2025-12-31");
            assert_eq!(config.read_only_sentinel, "Read Only Test");
            assert_eq!(config.assertion_mode, AssertionMode::Collect);
        }

        #[test]
        fn test_yaml_partial_override() {
            let config = SuiteConfig::from_yaml_str(
                "paste_shortcut: Meta+V\ndecimal_rule: round\nassertion_mode: fail-fast\n",
            )
            .unwrap();
            assert_eq!(config.paste_shortcut, "Meta+V");
            assert_eq!(config.decimal_rule, DecimalRule::Round);
            assert_eq!(config.assertion_mode, AssertionMode::FailFast);
            assert_eq!(config.default_date_min, "2020-01-01");
        }

        #[test]
        fn test_yaml_bad_date_rejected() {
            let err = SuiteConfig::from_yaml_str("default_date_min: yesterday\n").unwrap_err();
            assert!(matches!(err, FormsError::Config { .. }));
            assert!(err.to_string().contains("default_date_min"));
        }

        #[test]
        fn test_yaml_malformed() {
            let err = SuiteConfig::from_yaml_str("decimal_rule: [").unwrap_err();
            assert!(matches!(err, FormsError::Yaml(_)));
        }

        #[test]
        fn test_builder() {
            let config = SuiteConfig::new()
                .with_paste_shortcut("Control+V")
                .with_decimal_rule(DecimalRule::Keep)
                .with_default_date_bounds("2000-01-01", "2030-12-31")
                .with_read_only_sentinel("locked");
            assert_eq!(config.paste_shortcut, "Control+V");
            assert_eq!(config.decimal_rule, DecimalRule::Keep);
            assert_eq!(config.default_date_max, "2030-12-31");
            assert_eq!(config.read_only_sentinel, "locked");
        }
    }
}
